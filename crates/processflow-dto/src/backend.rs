//! Wire shapes exchanged with the REST backend.
//!
//! Inbound records keep every field optional so that validation happens in
//! the translators, where a missing field produces a
//! [`TranslationError`](crate::TranslationError) naming it instead of a
//! generic decoder message. Outbound patches omit every field left as
//! `None`, because the backend treats an absent field as "leave unchanged"
//! and an empty one as "clear".

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::identity::BackendIdentified;

/// A cross-reference to another backend record.
///
/// The API returns either a bare identifier or, for populated responses, the
/// referenced document itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BackendRef {
    /// Bare identifier string.
    Id(String),
    /// Populated document carrying its own identifier.
    Embedded(EmbeddedRef),
    /// Anything else; resolves to the unknown frontend identifier.
    Other(Value),
}

impl BackendRef {
    /// The referenced backend identifier, when one is present.
    #[must_use]
    pub fn backend_id(&self) -> Option<&str> {
        match self {
            Self::Id(id) => non_blank(id),
            Self::Embedded(embedded) => embedded.backend_id(),
            Self::Other(_) => None,
        }
    }

    /// Whether the reference is a blank identifier string.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Id(id) if id.trim().is_empty())
    }
}

/// Identifier fields of a populated reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedRef {
    /// Native identifier.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Legacy identifier key.
    #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<String>,
}

impl BackendIdentified for EmbeddedRef {
    fn backend_id(&self) -> Option<&str> {
        pick_backend_id(self.id.as_deref(), self.legacy_id.as_deref())
    }
}

/// User document as returned by `/users`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendUser {
    /// Native identifier.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Legacy identifier key.
    #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<String>,
    /// Login name.
    pub username: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Display name under its Portuguese key.
    pub nome: Option<String>,
    /// Contact address.
    pub email: Option<String>,
    /// `admin`, `manager` or `user`.
    pub role: Option<String>,
    /// Job title.
    pub position: Option<String>,
    /// Job title under its Portuguese key.
    pub cargo: Option<String>,
    /// Department name.
    pub department: Option<String>,
    /// Department name under its Portuguese key.
    pub departamento: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Avatar URL.
    pub avatar: Option<String>,
    /// Whether the account is enabled.
    pub active: Option<bool>,
    /// Creation timestamp.
    pub created_at: Option<String>,
}

impl BackendIdentified for BackendUser {
    fn backend_id(&self) -> Option<&str> {
        pick_backend_id(self.id.as_deref(), self.legacy_id.as_deref())
    }
}

/// Process document as returned by `/processes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendProcess {
    /// Native identifier.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Legacy identifier key.
    #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<String>,
    /// Process title.
    pub title: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Status code, e.g. `EM_ANDAMENTO`.
    pub status: Option<String>,
    /// Priority code, e.g. `URGENTE`.
    pub priority: Option<String>,
    /// Category name.
    pub category: Option<String>,
    /// Category name under its Portuguese key.
    pub categoria: Option<String>,
    /// Responsible user.
    pub responsible: Option<BackendRef>,
    /// Planned start date.
    pub start_date: Option<String>,
    /// Deadline.
    pub due_date: Option<String>,
    /// Completion percentage as sent, possibly fractional or out of range.
    pub progress: Option<f64>,
    /// Creation timestamp.
    pub created_at: Option<String>,
}

impl BackendProcess {
    /// Completion percentage rounded to a whole number in `0..=100`.
    ///
    /// Missing or non-finite values read as zero.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        self.progress.map_or(0, whole_percent)
    }
}

impl BackendIdentified for BackendProcess {
    fn backend_id(&self) -> Option<&str> {
        pick_backend_id(self.id.as_deref(), self.legacy_id.as_deref())
    }
}

/// Task document as returned by `/tasks`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendTask {
    /// Native identifier.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Legacy identifier key.
    #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<String>,
    /// Task title.
    pub title: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Status code, e.g. `CONCLUIDA`.
    pub status: Option<String>,
    /// Priority code.
    pub priority: Option<String>,
    /// Assigned user.
    pub assignee: Option<BackendRef>,
    /// Assigned user under its legacy key.
    pub assigned_to: Option<BackendRef>,
    /// Parent process; absent for independent tasks.
    pub process: Option<BackendRef>,
    /// Parent process under its legacy key.
    pub process_id: Option<BackendRef>,
    /// Deadline.
    pub due_date: Option<String>,
    /// Creation timestamp.
    pub created_at: Option<String>,
}

impl BackendTask {
    /// The assigned user, preferring whichever key carries a usable id.
    #[must_use]
    pub fn assignee_ref(&self) -> Option<&BackendRef> {
        pick_reference(self.assignee.as_ref(), self.assigned_to.as_ref())
    }

    /// The parent process, preferring whichever key carries a usable id.
    #[must_use]
    pub fn process_ref(&self) -> Option<&BackendRef> {
        pick_reference(self.process.as_ref(), self.process_id.as_ref())
    }
}

impl BackendIdentified for BackendTask {
    fn backend_id(&self) -> Option<&str> {
        pick_backend_id(self.id.as_deref(), self.legacy_id.as_deref())
    }
}

/// Partial user payload for create and update requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendUserPatch {
    /// Login name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Contact address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Backend role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<&'static str>,
    /// Job title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    /// Department name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Avatar URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Whether the account is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Partial process payload for create and update requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendProcessPatch {
    /// Process title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Status code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    /// Priority code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<&'static str>,
    /// Category name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Responsible user identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible: Option<String>,
    /// Planned start date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Deadline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Completion percentage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
}

/// Partial task payload for create and update requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendTaskPatch {
    /// Task title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Status code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    /// Priority code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<&'static str>,
    /// Assigned user identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Parent process identifier. Never sent empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process: Option<String>,
    /// Deadline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// Prefer the native identifier, falling back to the legacy key.
fn pick_backend_id<'a>(native: Option<&'a str>, legacy: Option<&'a str>) -> Option<&'a str> {
    native.and_then(non_blank).or_else(|| legacy.and_then(non_blank))
}

/// Round a percentage to a whole number in `0..=100`; non-finite reads as 0.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is clamped to 0..=100 before the cast"
)]
pub(crate) fn whole_percent(value: f64) -> u8 {
    Some(value)
        .filter(|finite| finite.is_finite())
        .map_or(0, |finite| finite.round().clamp(0.0, 100.0) as u8)
}

/// First reference with a usable id, else whichever one is present.
fn pick_reference<'a>(
    current: Option<&'a BackendRef>,
    legacy: Option<&'a BackendRef>,
) -> Option<&'a BackendRef> {
    let usable = |reference: &&BackendRef| reference.backend_id().is_some();
    current
        .filter(usable)
        .or_else(|| legacy.filter(usable))
        .or(current)
        .or(legacy)
}

fn non_blank(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case::bare(json!("650c1f7e9d3b2a1c00f4a1b2"), Some("650c1f7e9d3b2a1c00f4a1b2"))]
    #[case::populated(
        json!({"_id": "650c1f7e9d3b2a1c00f4a1b2", "name": "Ana"}),
        Some("650c1f7e9d3b2a1c00f4a1b2")
    )]
    #[case::populated_legacy(json!({"id": "650c1f7e9d3b2a1c00f4a1b2"}), Some("650c1f7e9d3b2a1c00f4a1b2"))]
    #[case::blank(json!(""), None)]
    #[case::number(json!(17), None)]
    #[case::object_without_id(json!({"name": "Ana"}), None)]
    fn references_expose_backend_id(#[case] raw: Value, #[case] expected: Option<&str>) {
        let reference: BackendRef = serde_json::from_value(raw).expect("decode reference");
        assert_eq!(reference.backend_id(), expected);
    }

    #[test]
    fn native_identifier_wins_over_legacy() {
        let user: BackendUser = serde_json::from_value(json!({
            "_id": "650c1f7e9d3b2a1c00f4a1b2",
            "id": "650c1f7e9d3b2a1c00f4a1c3"
        }))
        .expect("decode user");
        assert_eq!(user.backend_id(), Some("650c1f7e9d3b2a1c00f4a1b2"));
    }

    #[test]
    fn legacy_identifier_is_used_when_native_is_blank() {
        let task: BackendTask = serde_json::from_value(json!({
            "_id": " ",
            "id": "650c1f7e9d3b2a1c00f4a1c3"
        }))
        .expect("decode task");
        assert_eq!(task.backend_id(), Some("650c1f7e9d3b2a1c00f4a1c3"));
    }

    #[test]
    fn task_accepts_legacy_reference_keys() {
        let task: BackendTask = serde_json::from_value(json!({
            "assignedTo": "650c1f7e9d3b2a1c00f4a1b2",
            "processId": "650c1f7e9d3b2a1c00f4a1d4"
        }))
        .expect("decode task");
        assert_eq!(
            task.assignee_ref().and_then(BackendRef::backend_id),
            Some("650c1f7e9d3b2a1c00f4a1b2")
        );
        assert_eq!(
            task.process_ref().and_then(BackendRef::backend_id),
            Some("650c1f7e9d3b2a1c00f4a1d4")
        );
    }

    #[rstest]
    #[case::both_usable(
        json!({"process": "650c1f7e9d3b2a1c00f4a1d4", "processId": "650c1f7e9d3b2a1c00f4a1c3"}),
        Some("650c1f7e9d3b2a1c00f4a1d4")
    )]
    #[case::current_blank(
        json!({"process": "", "processId": {"_id": "650c1f7e9d3b2a1c00f4a1c3"}}),
        Some("650c1f7e9d3b2a1c00f4a1c3")
    )]
    #[case::legacy_null(
        json!({"process": "650c1f7e9d3b2a1c00f4a1d4", "processId": null}),
        Some("650c1f7e9d3b2a1c00f4a1d4")
    )]
    #[case::neither_usable(json!({"process": "", "processId": 7}), None)]
    fn task_carrying_both_process_keys_decodes(
        #[case] raw: Value,
        #[case] expected: Option<&str>,
    ) {
        let task: BackendTask = serde_json::from_value(raw).expect("decode task");
        assert_eq!(task.process_ref().and_then(BackendRef::backend_id), expected);
    }

    #[test]
    fn task_carrying_both_assignee_keys_decodes() {
        let task: BackendTask = serde_json::from_value(json!({
            "assignee": {"name": "Ana Souza"},
            "assignedTo": "650c1f7e9d3b2a1c00f4a1b2"
        }))
        .expect("decode task");
        assert_eq!(
            task.assignee_ref().and_then(BackendRef::backend_id),
            Some("650c1f7e9d3b2a1c00f4a1b2")
        );
    }

    #[test]
    fn user_carrying_both_job_title_keys_decodes() {
        let user: BackendUser = serde_json::from_value(json!({
            "position": "Analista",
            "cargo": "Analista Sênior"
        }))
        .expect("decode user");
        assert_eq!(user.position.as_deref(), Some("Analista"));
        assert_eq!(user.cargo.as_deref(), Some("Analista Sênior"));
    }

    #[rstest]
    #[case::whole(json!(40), 40)]
    #[case::fractional_down(json!(33.4), 33)]
    #[case::fractional_up(json!(33.5), 34)]
    #[case::negative(json!(-5), 0)]
    #[case::above_full(json!(250.7), 100)]
    #[case::null(json!(null), 0)]
    fn progress_is_rounded_and_clamped(#[case] progress: Value, #[case] expected: u8) {
        let process: BackendProcess =
            serde_json::from_value(json!({"progress": progress})).expect("decode process");
        assert_eq!(process.progress_percent(), expected);
    }

    #[test]
    fn empty_patch_serialises_to_empty_object() {
        let json = serde_json::to_value(BackendTaskPatch::default()).expect("serialise");
        assert_eq!(json, json!({}));
    }
}
