//! Translators between backend documents and dashboard records.
//!
//! Each entity has a zero-sized translator implementing
//! [`RecordTranslator`]. Reading a backend record resolves every embedded
//! identifier through the session's [`IdentityMap`], recording new mappings
//! as it goes. Building a backend payload only reads the map.

mod process;
mod task;
mod user;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::backend::BackendRef;
use crate::error::{EntityKind, TranslationError};
use crate::identity::{BackendIdentified, FrontendId, IdentityMap};
use crate::vocabulary::{Priority, Status};

pub use process::ProcessTranslator;
pub use task::TaskTranslator;
pub use user::UserTranslator;

const CALENDAR_DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire name reported when a record carries neither `_id` nor `id`.
const ID_FIELD: &str = "_id";

/// A pair of translations for one entity.
pub trait RecordTranslator {
    /// Entity handled by this translator.
    const ENTITY: EntityKind;

    /// Backend document shape.
    type Backend: DeserializeOwned + BackendIdentified;
    /// Fully populated dashboard record.
    type Frontend: Serialize;
    /// Partial dashboard record produced by a form.
    type Patch: DeserializeOwned;
    /// Partial backend payload.
    type BackendPatch: Serialize;

    /// Convert a backend document into a dashboard record.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError`] when the identifier or a required field
    /// is missing, or when a status, priority or date cannot be read.
    fn backend_to_frontend(
        map: &mut IdentityMap,
        record: Self::Backend,
    ) -> Result<Self::Frontend, TranslationError>;

    /// Convert a partial dashboard record into a partial backend payload.
    ///
    /// Only fields present in `patch` appear in the output.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError::InvalidDate`] when a date field is not
    /// `YYYY-MM-DD`.
    fn frontend_to_backend(
        map: &IdentityMap,
        patch: Self::Patch,
    ) -> Result<Self::BackendPatch, TranslationError>;
}

/// Decode a raw backend document.
///
/// # Errors
///
/// Returns [`TranslationError::NullRecord`] for `null` and
/// [`TranslationError::Malformed`] when the JSON does not fit the backend
/// shape.
pub fn decode_record<T: RecordTranslator>(value: Value) -> Result<T::Backend, TranslationError> {
    decode(T::ENTITY, value)
}

/// Decode a raw dashboard patch.
///
/// # Errors
///
/// Returns [`TranslationError::NullRecord`] for `null` and
/// [`TranslationError::Malformed`] for unknown vocabulary or mistyped
/// fields.
pub fn decode_patch<T: RecordTranslator>(value: Value) -> Result<T::Patch, TranslationError> {
    decode(T::ENTITY, value)
}

/// Decode and translate a raw backend document in one step.
///
/// # Errors
///
/// Returns any error from [`decode_record`] or
/// [`RecordTranslator::backend_to_frontend`].
///
/// # Examples
///
/// ```
/// use processflow_dto::{IdentityMap, UserTranslator, translate_value};
/// use serde_json::json;
///
/// let mut map = IdentityMap::new();
/// let user = translate_value::<UserTranslator>(
///     &mut map,
///     json!({
///         "_id": "650c1f7e9d3b2a1c00f4a1b2",
///         "username": "ana",
///         "name": "Ana Souza",
///         "email": "ana@example.com",
///         "role": "manager"
///     }),
/// )
/// .expect("valid user");
///
/// assert_eq!(user.id.get(), 32_178);
/// assert_eq!(user.cargo, "Gerente");
/// assert_eq!(user.departamento, "Geral");
/// ```
pub fn translate_value<T: RecordTranslator>(
    map: &mut IdentityMap,
    value: Value,
) -> Result<T::Frontend, TranslationError> {
    let record = decode_record::<T>(value)?;
    T::backend_to_frontend(map, record)
}

fn decode<D: DeserializeOwned>(entity: EntityKind, value: Value) -> Result<D, TranslationError> {
    if value.is_null() {
        return Err(TranslationError::NullRecord { entity });
    }
    serde_json::from_value(value).map_err(|err| TranslationError::Malformed {
        entity,
        message: err.to_string(),
    })
}

/// Collects missing mandatory fields so they can be reported together.
struct RequiredFields {
    entity: EntityKind,
    missing: Vec<&'static str>,
}

impl RequiredFields {
    const fn new(entity: EntityKind) -> Self {
        Self {
            entity,
            missing: Vec::new(),
        }
    }

    /// Take a mandatory value, noting `field` when it is absent or blank.
    fn take(&mut self, field: &'static str, value: Option<String>) -> String {
        non_blank(value).unwrap_or_else(|| {
            self.missing.push(field);
            String::new()
        })
    }

    fn take_id(&mut self, record: &impl BackendIdentified) -> String {
        self.take(ID_FIELD, record.backend_id().map(str::to_owned))
    }

    fn finish(self) -> Result<(), TranslationError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(TranslationError::MissingFields {
                entity: self.entity,
                fields: self.missing,
            })
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

/// Resolve an optional cross-reference.
///
/// An absent reference is simply unknown; a present one that carries no
/// identifier is logged before degrading the same way.
fn resolve_reference(
    map: &mut IdentityMap,
    entity: EntityKind,
    field: &'static str,
    reference: Option<&BackendRef>,
) -> FrontendId {
    let Some(present) = reference else {
        return FrontendId::UNKNOWN;
    };
    present.backend_id().map_or_else(
        || {
            warn!(
                entity = %entity,
                field,
                "reference without usable identifier; resolving to unknown frontend id"
            );
            FrontendId::UNKNOWN
        },
        |backend_id| map.resolve_frontend_id(backend_id),
    )
}

fn status_from_backend(
    entity: EntityKind,
    code: Option<String>,
) -> Result<Status, TranslationError> {
    non_blank(code).map_or(Ok(Status::default()), |raw| {
        Status::from_backend_code(&raw)
            .ok_or(TranslationError::UnknownStatus { entity, value: raw })
    })
}

fn priority_from_backend(
    entity: EntityKind,
    code: Option<String>,
) -> Result<Priority, TranslationError> {
    non_blank(code).map_or(Ok(Priority::default()), |raw| {
        Priority::from_backend_code(&raw)
            .ok_or(TranslationError::UnknownPriority { entity, value: raw })
    })
}

/// Reduce a backend timestamp or date to a `YYYY-MM-DD` calendar date.
///
/// Timestamps are converted to UTC first.
fn date_from_backend(
    entity: EntityKind,
    field: &'static str,
    value: Option<String>,
) -> Result<Option<String>, TranslationError> {
    non_blank(value)
        .map(|raw| {
            parse_backend_date(&raw)
                .map(|date| date.format(CALENDAR_DATE_FORMAT).to_string())
                .ok_or(TranslationError::InvalidDate {
                    entity,
                    field,
                    value: raw,
                })
        })
        .transpose()
}

/// Check a dashboard date before it is sent.
///
/// A blank value is passed through so the backend clears the field.
fn date_to_backend(
    entity: EntityKind,
    field: &'static str,
    value: Option<String>,
) -> Result<Option<String>, TranslationError> {
    match value {
        Some(raw) if !raw.trim().is_empty() => {
            if NaiveDate::parse_from_str(raw.trim(), CALENDAR_DATE_FORMAT).is_ok() {
                Ok(Some(raw.trim().to_owned()))
            } else {
                Err(TranslationError::InvalidDate {
                    entity,
                    field,
                    value: raw,
                })
            }
        }
        Some(_) => Ok(Some(String::new())),
        None => Ok(None),
    }
}

fn parse_backend_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    DateTime::parse_from_rfc3339(trimmed)
        .map(|timestamp| timestamp.with_timezone(&Utc).date_naive())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(trimmed, CALENDAR_DATE_FORMAT).ok())
}
