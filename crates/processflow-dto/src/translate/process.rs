//! Process translation.

use super::{
    RecordTranslator, RequiredFields, date_from_backend, date_to_backend, non_blank,
    priority_from_backend, resolve_reference, status_from_backend,
};
use crate::backend::{BackendProcess, BackendProcessPatch};
use crate::error::{EntityKind, TranslationError};
use crate::frontend::{Processo, ProcessoPatch};
use crate::identity::IdentityMap;
use crate::vocabulary::{DEFAULT_GROUP_LABEL, RecordKind};

/// Translates processes.
///
/// Only `title` is mandatory. Status and priority default to `pendente`
/// and `media`, the category to `"Geral"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessTranslator;

impl RecordTranslator for ProcessTranslator {
    const ENTITY: EntityKind = EntityKind::Process;

    type Backend = BackendProcess;
    type Frontend = Processo;
    type Patch = ProcessoPatch;
    type BackendPatch = BackendProcessPatch;

    fn backend_to_frontend(
        map: &mut IdentityMap,
        record: BackendProcess,
    ) -> Result<Processo, TranslationError> {
        let mut required = RequiredFields::new(Self::ENTITY);
        let backend_id = required.take_id(&record);
        let progresso = record.progress_percent();
        let titulo = required.take("title", record.title);
        required.finish()?;

        let status = status_from_backend(Self::ENTITY, record.status)?;
        let prioridade = priority_from_backend(Self::ENTITY, record.priority)?;
        let data_inicio = date_from_backend(Self::ENTITY, "startDate", record.start_date)?;
        let data_prazo = date_from_backend(Self::ENTITY, "dueDate", record.due_date)?;
        let data_criacao = date_from_backend(Self::ENTITY, "createdAt", record.created_at)?;
        let categoria = non_blank(record.category)
            .or_else(|| non_blank(record.categoria))
            .unwrap_or_else(|| DEFAULT_GROUP_LABEL.to_owned());

        Ok(Processo {
            id: map.resolve_frontend_id(&backend_id),
            titulo,
            descricao: record.description.unwrap_or_default(),
            status,
            prioridade,
            categoria,
            responsavel_id: resolve_reference(
                map,
                Self::ENTITY,
                "responsible",
                record.responsible.as_ref(),
            ),
            progresso,
            data_inicio,
            data_prazo,
            data_criacao,
        })
    }

    fn frontend_to_backend(
        map: &IdentityMap,
        patch: ProcessoPatch,
    ) -> Result<BackendProcessPatch, TranslationError> {
        Ok(BackendProcessPatch {
            title: patch.titulo,
            description: patch.descricao,
            status: patch
                .status
                .map(|status| status.backend_code(RecordKind::Process)),
            priority: patch.prioridade.map(|priority| priority.backend_code()),
            category: patch.categoria,
            responsible: patch
                .responsavel_id
                .map(|id| map.resolve_backend_id(id).to_owned()),
            start_date: date_to_backend(Self::ENTITY, "dataInicio", patch.data_inicio)?,
            due_date: date_to_backend(Self::ENTITY, "dataPrazo", patch.data_prazo)?,
            progress: patch.progresso,
        })
    }
}
