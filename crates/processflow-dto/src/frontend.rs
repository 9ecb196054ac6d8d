//! Dashboard-side record shapes.
//!
//! Full records are what the translators hand to UI state; every field is
//! populated. Patches carry whichever subset of fields a form edited and are
//! the input for building backend payloads.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::backend::whole_percent;
use crate::identity::FrontendId;
use crate::vocabulary::{Priority, Status, TipoUsuario};

/// A dashboard user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Session-local identifier.
    pub id: FrontendId,
    /// Login name.
    pub username: String,
    /// Display name.
    pub nome: String,
    /// Contact address.
    pub email: String,
    /// Job title.
    pub cargo: String,
    /// Department name.
    pub departamento: String,
    /// Account type.
    pub tipo_usuario: TipoUsuario,
    /// Whether the account is enabled.
    pub ativo: bool,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Creation date, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_criacao: Option<String>,
}

/// A business process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Processo {
    /// Session-local identifier.
    pub id: FrontendId,
    /// Title.
    pub titulo: String,
    /// Description; empty when the backend sent none.
    pub descricao: String,
    /// Workflow status.
    pub status: Status,
    /// Priority.
    pub prioridade: Priority,
    /// Category name.
    pub categoria: String,
    /// Responsible user; [`FrontendId::UNKNOWN`] when unresolved.
    pub responsavel_id: FrontendId,
    /// Completion percentage.
    pub progresso: u8,
    /// Planned start date, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_inicio: Option<String>,
    /// Deadline, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_prazo: Option<String>,
    /// Creation date, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_criacao: Option<String>,
}

/// A task, optionally belonging to a process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tarefa {
    /// Session-local identifier.
    pub id: FrontendId,
    /// Title.
    pub titulo: String,
    /// Description; empty when the backend sent none.
    pub descricao: String,
    /// Workflow status.
    pub status: Status,
    /// Priority.
    pub prioridade: Priority,
    /// Assigned user; [`FrontendId::UNKNOWN`] when unresolved.
    pub responsavel_id: FrontendId,
    /// Parent process; `None` for independent tasks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processo_id: Option<FrontendId>,
    /// Deadline, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_vencimento: Option<String>,
    /// Creation date, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_criacao: Option<String>,
}

/// Fields edited in a user form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPatch {
    /// Login name.
    pub username: Option<String>,
    /// Display name.
    pub nome: Option<String>,
    /// Contact address.
    pub email: Option<String>,
    /// New password, only sent on creation or reset.
    pub senha: Option<String>,
    /// Job title.
    pub cargo: Option<String>,
    /// Department name.
    pub departamento: Option<String>,
    /// Account type.
    pub tipo_usuario: Option<TipoUsuario>,
    /// Phone number.
    pub telefone: Option<String>,
    /// Avatar URL.
    pub avatar: Option<String>,
    /// Whether the account is enabled.
    pub ativo: Option<bool>,
}

/// Fields edited in a process form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessoPatch {
    /// Title.
    pub titulo: Option<String>,
    /// Description.
    pub descricao: Option<String>,
    /// Workflow status.
    pub status: Option<Status>,
    /// Priority.
    pub prioridade: Option<Priority>,
    /// Category name.
    pub categoria: Option<String>,
    /// Responsible user.
    #[serde(deserialize_with = "lenient_frontend_id")]
    pub responsavel_id: Option<FrontendId>,
    /// Planned start date, `YYYY-MM-DD`.
    pub data_inicio: Option<String>,
    /// Deadline, `YYYY-MM-DD`.
    pub data_prazo: Option<String>,
    /// Completion percentage, rounded and clamped to `0..=100`.
    #[serde(deserialize_with = "lenient_percent")]
    pub progresso: Option<u8>,
}

/// Fields edited in a task form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TarefaPatch {
    /// Title.
    pub titulo: Option<String>,
    /// Description.
    pub descricao: Option<String>,
    /// Workflow status.
    pub status: Option<Status>,
    /// Priority.
    pub prioridade: Option<Priority>,
    /// Assigned user.
    #[serde(deserialize_with = "lenient_frontend_id")]
    pub responsavel_id: Option<FrontendId>,
    /// Parent process; `None` or unknown detaches the task.
    #[serde(deserialize_with = "lenient_frontend_id")]
    pub processo_id: Option<FrontendId>,
    /// Deadline, `YYYY-MM-DD`.
    pub data_vencimento: Option<String>,
}

/// Decode a frontend identifier the way form state holds it.
///
/// Select inputs yield numbers, numeric strings or `""`. `null` and blank
/// strings mean "not set"; negative, fractional or non-numeric values decode
/// to [`FrontendId::UNKNOWN`].
fn lenient_frontend_id<'de, D>(deserializer: D) -> Result<Option<FrontendId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(frontend_id_from_value))
}

/// Decode a percentage slider value, accepting fractions and stray ranges.
fn lenient_percent<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.map(whole_percent))
}

fn frontend_id_from_value(value: &Value) -> Option<FrontendId> {
    match value {
        Value::Null => None,
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(
            text.trim()
                .parse::<u32>()
                .map_or(FrontendId::UNKNOWN, FrontendId::new),
        ),
        Value::Number(number) => Some(
            number
                .as_u64()
                .and_then(|raw| u32::try_from(raw).ok())
                .map_or(FrontendId::UNKNOWN, FrontendId::new),
        ),
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => Some(FrontendId::UNKNOWN),
    }
}
