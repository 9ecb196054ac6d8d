//! Task translation.

use super::{
    RecordTranslator, RequiredFields, date_from_backend, date_to_backend, priority_from_backend,
    resolve_reference, status_from_backend,
};
use crate::backend::{BackendRef, BackendTask, BackendTaskPatch};
use crate::error::{EntityKind, TranslationError};
use crate::frontend::{Tarefa, TarefaPatch};
use crate::identity::{FrontendId, IdentityMap};
use crate::vocabulary::RecordKind;

/// Translates tasks.
///
/// A task without a usable process reference is independent: it carries no
/// `processoId` on the dashboard and no `process` key on the wire.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskTranslator;

impl RecordTranslator for TaskTranslator {
    const ENTITY: EntityKind = EntityKind::Task;

    type Backend = BackendTask;
    type Frontend = Tarefa;
    type Patch = TarefaPatch;
    type BackendPatch = BackendTaskPatch;

    fn backend_to_frontend(
        map: &mut IdentityMap,
        record: BackendTask,
    ) -> Result<Tarefa, TranslationError> {
        let mut required = RequiredFields::new(Self::ENTITY);
        let backend_id = required.take_id(&record);
        let assignee_ref = record.assignee_ref().cloned();
        let process_ref = record.process_ref().cloned();
        let titulo = required.take("title", record.title);
        required.finish()?;

        let status = status_from_backend(Self::ENTITY, record.status)?;
        let prioridade = priority_from_backend(Self::ENTITY, record.priority)?;
        let data_vencimento = date_from_backend(Self::ENTITY, "dueDate", record.due_date)?;
        let data_criacao = date_from_backend(Self::ENTITY, "createdAt", record.created_at)?;

        let id = map.resolve_frontend_id(&backend_id);
        let responsavel_id =
            resolve_reference(map, Self::ENTITY, "assignee", assignee_ref.as_ref());
        let processo_id = parent_process(map, process_ref.as_ref());

        Ok(Tarefa {
            id,
            titulo,
            descricao: record.description.unwrap_or_default(),
            status,
            prioridade,
            responsavel_id,
            processo_id,
            data_vencimento,
            data_criacao,
        })
    }

    fn frontend_to_backend(
        map: &IdentityMap,
        patch: TarefaPatch,
    ) -> Result<BackendTaskPatch, TranslationError> {
        Ok(BackendTaskPatch {
            title: patch.titulo,
            description: patch.descricao,
            status: patch
                .status
                .map(|status| status.backend_code(RecordKind::Task)),
            priority: patch.prioridade.map(|priority| priority.backend_code()),
            assignee: patch
                .responsavel_id
                .map(|id| map.resolve_backend_id(id).to_owned()),
            process: patch
                .processo_id
                .filter(|id| !id.is_unknown())
                .map(|id| map.resolve_backend_id(id).to_owned()),
            due_date: date_to_backend(Self::ENTITY, "dataVencimento", patch.data_vencimento)?,
        })
    }
}

/// Resolve the parent process, treating anything unusable as "no parent".
fn parent_process(map: &mut IdentityMap, reference: Option<&BackendRef>) -> Option<FrontendId> {
    reference
        .filter(|present| !present.is_blank())
        .map(|present| resolve_reference(map, EntityKind::Task, "process", Some(present)))
        .filter(|id| !id.is_unknown())
}

#[cfg(test)]
mod tests {
    //! Covers task translation, including independent tasks.

    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    use super::*;
    use crate::translate::{decode_patch, decode_record};
    use crate::vocabulary::{Priority, Status};

    const ANA_ID: &str = "650c1f7e9d3b2a1c00f4a1b2";
    const PROCESS_ID: &str = "650c1f7e9d3b2a1c00f4a1d4";
    const TASK_ID: &str = "650c1f7e9d3b2a1c00f4a1e5";

    #[fixture]
    fn revisar_contrato() -> Value {
        json!({
            "_id": TASK_ID,
            "title": "Revisar contrato",
            "status": "CONCLUIDA",
            "priority": "ALTA",
            "assignee": {"_id": ANA_ID, "name": "Ana Souza"},
            "process": PROCESS_ID,
            "dueDate": "2024-03-01T00:00:00Z"
        })
    }

    fn translate(map: &mut IdentityMap, raw: Value) -> Result<Tarefa, TranslationError> {
        let record = decode_record::<TaskTranslator>(raw)?;
        TaskTranslator::backend_to_frontend(map, record)
    }

    fn payload(map: &IdentityMap, raw: Value) -> Value {
        let patch = decode_patch::<TaskTranslator>(raw).expect("decode patch");
        let translated = TaskTranslator::frontend_to_backend(map, patch).expect("translate");
        serde_json::to_value(translated).expect("serialise")
    }

    #[rstest]
    fn translates_task_with_populated_assignee(revisar_contrato: Value) {
        let mut map = IdentityMap::new();
        let tarefa = translate(&mut map, revisar_contrato).expect("valid task");

        assert_eq!(
            tarefa,
            Tarefa {
                id: FrontendId::new(32_229),
                titulo: "Revisar contrato".to_owned(),
                descricao: String::new(),
                status: Status::Concluido,
                prioridade: Priority::Alta,
                responsavel_id: FrontendId::new(32_178),
                processo_id: Some(FrontendId::new(32_212)),
                data_vencimento: Some("2024-03-01".to_owned()),
                data_criacao: None,
            }
        );
    }

    #[rstest]
    #[case::absent(json!({"_id": TASK_ID, "title": "Avulsa"}))]
    #[case::null(json!({"_id": TASK_ID, "title": "Avulsa", "process": null}))]
    #[case::blank(json!({"_id": TASK_ID, "title": "Avulsa", "process": ""}))]
    #[case::short(json!({"_id": TASK_ID, "title": "Avulsa", "process": "p1"}))]
    fn unusable_process_reference_yields_independent_task(#[case] raw: Value) {
        let mut map = IdentityMap::new();
        let tarefa = translate(&mut map, raw).expect("valid task");
        assert_eq!(tarefa.processo_id, None);
        assert_eq!(tarefa.responsavel_id, FrontendId::UNKNOWN);
    }

    #[rstest]
    fn task_with_current_and_legacy_reference_keys_translates(revisar_contrato: Value) {
        let mut raw = revisar_contrato;
        if let Some(object) = raw.as_object_mut() {
            object.insert("processId".to_owned(), json!({"_id": PROCESS_ID}));
            object.insert("assignedTo".to_owned(), json!(ANA_ID));
        }
        let mut map = IdentityMap::new();

        let tarefa = translate(&mut map, raw).expect("valid task");

        assert_eq!(tarefa.processo_id, Some(FrontendId::new(32_212)));
        assert_eq!(tarefa.responsavel_id, FrontendId::new(32_178));
    }

    #[test]
    fn legacy_process_key_fills_in_for_blank_current_key() {
        let mut map = IdentityMap::new();
        let tarefa = translate(
            &mut map,
            json!({"_id": TASK_ID, "title": "Avulsa", "process": "", "processId": PROCESS_ID}),
        )
        .expect("valid task");
        assert_eq!(tarefa.processo_id, Some(FrontendId::new(32_212)));
    }

    #[test]
    fn parent_deriving_to_sentinel_is_treated_as_independent() {
        let mut map = IdentityMap::new();
        let tarefa = translate(
            &mut map,
            json!({"_id": TASK_ID, "title": "Avulsa", "process": "aaaaaaaaaaaaaaaa000f4240"}),
        )
        .expect("valid task");

        assert_eq!(tarefa.processo_id, None);
        assert_eq!(map.frontend_id_for("aaaaaaaaaaaaaaaa000f4240"), None);
    }

    #[rstest]
    #[case::absent(json!({"titulo": "Avulsa"}))]
    #[case::null(json!({"titulo": "Avulsa", "processoId": null}))]
    #[case::empty_string(json!({"titulo": "Avulsa", "processoId": ""}))]
    #[case::zero(json!({"titulo": "Avulsa", "processoId": 0}))]
    #[case::negative(json!({"titulo": "Avulsa", "processoId": -1}))]
    fn independent_task_omits_process_key(#[case] raw: Value) {
        let map = IdentityMap::new();
        assert_eq!(payload(&map, raw), json!({"title": "Avulsa"}));
    }

    #[rstest]
    fn linked_task_sends_backend_identifiers(revisar_contrato: Value) {
        let mut map = IdentityMap::new();
        translate(&mut map, revisar_contrato).expect("valid task");

        let sent = payload(
            &map,
            json!({"processoId": "32212", "responsavelId": 32178, "prioridade": "critica"}),
        );

        assert_eq!(
            sent,
            json!({"process": PROCESS_ID, "assignee": ANA_ID, "priority": "URGENTE"})
        );
    }

    #[test]
    fn overdue_round_trips_through_cancelled_code() {
        let mut map = IdentityMap::new();
        let sent = payload(&map, json!({"status": "atrasado"}));
        assert_eq!(sent, json!({"status": "CANCELADA"}));

        let tarefa = translate(
            &mut map,
            json!({"_id": TASK_ID, "title": "Revisar contrato", "status": sent.get("status")}),
        )
        .expect("valid task");
        assert_eq!(tarefa.status, Status::Atrasado);
    }

    #[rstest]
    #[case(Status::Concluido, "CONCLUIDA")]
    #[case(Status::Atrasado, "CANCELADA")]
    fn statuses_use_feminine_codes(#[case] status: Status, #[case] code: &str) {
        let map = IdentityMap::new();
        let patch = TarefaPatch {
            status: Some(status),
            ..TarefaPatch::default()
        };
        let sent = TaskTranslator::frontend_to_backend(&map, patch).expect("translate");
        assert_eq!(sent.status, Some(code));
    }

    #[test]
    fn masculine_codes_are_accepted_for_tasks() {
        let mut map = IdentityMap::new();
        let tarefa = translate(
            &mut map,
            json!({"_id": TASK_ID, "title": "Revisar contrato", "status": "CONCLUIDO"}),
        )
        .expect("valid task");
        assert_eq!(tarefa.status, Status::Concluido);
    }

    #[test]
    fn blank_due_date_clears_field() {
        let map = IdentityMap::new();
        assert_eq!(
            payload(&map, json!({"dataVencimento": ""})),
            json!({"dueDate": ""})
        );
    }
}
