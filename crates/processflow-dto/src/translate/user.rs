//! User translation.

use super::{RecordTranslator, RequiredFields, date_from_backend, non_blank};
use crate::backend::{BackendUser, BackendUserPatch};
use crate::error::{EntityKind, TranslationError};
use crate::frontend::{User, UserPatch};
use crate::identity::IdentityMap;
use crate::vocabulary::{DEFAULT_GROUP_LABEL, TipoUsuario, UserRole};

/// Translates users.
///
/// `username`, a display name (`name` or `nome`) and `email` are mandatory.
/// The job title falls back to a label derived from the role, and the
/// account type reads every elevated role as [`TipoUsuario::Gestor`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UserTranslator;

impl RecordTranslator for UserTranslator {
    const ENTITY: EntityKind = EntityKind::User;

    type Backend = BackendUser;
    type Frontend = User;
    type Patch = UserPatch;
    type BackendPatch = BackendUserPatch;

    fn backend_to_frontend(
        map: &mut IdentityMap,
        record: BackendUser,
    ) -> Result<User, TranslationError> {
        let mut required = RequiredFields::new(Self::ENTITY);
        let backend_id = required.take_id(&record);
        let username = required.take("username", record.username);
        let nome = required.take("name", non_blank(record.name).or(record.nome));
        let email = required.take("email", record.email);
        required.finish()?;

        let role = UserRole::from_backend(record.role.as_deref());
        let cargo = non_blank(record.position)
            .or_else(|| non_blank(record.cargo))
            .unwrap_or_else(|| role.default_cargo().to_owned());
        let departamento = non_blank(record.department)
            .or_else(|| non_blank(record.departamento))
            .unwrap_or_else(|| DEFAULT_GROUP_LABEL.to_owned());
        let data_criacao = date_from_backend(Self::ENTITY, "createdAt", record.created_at)?;

        Ok(User {
            id: map.resolve_frontend_id(&backend_id),
            username,
            nome,
            email,
            cargo,
            departamento,
            tipo_usuario: TipoUsuario::from_role(role),
            ativo: record.active.unwrap_or(true),
            telefone: non_blank(record.phone),
            avatar: non_blank(record.avatar),
            data_criacao,
        })
    }

    fn frontend_to_backend(
        _map: &IdentityMap,
        patch: UserPatch,
    ) -> Result<BackendUserPatch, TranslationError> {
        Ok(BackendUserPatch {
            username: patch.username,
            name: patch.nome,
            email: patch.email,
            password: patch.senha,
            role: patch.tipo_usuario.map(|tipo| tipo.backend_role().as_str()),
            position: patch.cargo,
            department: patch.departamento,
            phone: patch.telefone,
            avatar: patch.avatar,
            active: patch.ativo,
        })
    }
}
