//! Error types for record translation.
//!
//! Identity resolution never fails: it degrades to sentinel values and logs a
//! warning. Translator failures, on the other hand, are surfaced to the
//! caller through [`TranslationError`] so malformed payloads are rejected
//! before they reach dashboard state.

use std::fmt;

use thiserror::Error;

/// Entity kinds handled by the translators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A dashboard user.
    User,
    /// A business process.
    Process,
    /// A task, optionally attached to a process.
    Task,
}

impl EntityKind {
    /// Lowercase name used in error messages and log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Process => "process",
            Self::Task => "task",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while translating a record in either direction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    /// The record was `null` instead of an object.
    #[error("{entity} record is null")]
    NullRecord {
        /// Entity the caller attempted to translate.
        entity: EntityKind,
    },

    /// The record could not be decoded into the expected shape.
    #[error("{entity} record is malformed: {message}")]
    Malformed {
        /// Entity the caller attempted to translate.
        entity: EntityKind,
        /// Decoder message describing the mismatch.
        message: String,
    },

    /// One or more mandatory fields were absent or blank.
    #[error("{entity} record is missing required fields: {}", .fields.join(", "))]
    MissingFields {
        /// Entity the caller attempted to translate.
        entity: EntityKind,
        /// Wire names of the missing fields, in declaration order.
        fields: Vec<&'static str>,
    },

    /// The status code is not part of the backend vocabulary.
    #[error("{entity} record has unknown status '{value}'")]
    UnknownStatus {
        /// Entity the caller attempted to translate.
        entity: EntityKind,
        /// Raw status code received.
        value: String,
    },

    /// The priority code is not part of the backend vocabulary.
    #[error("{entity} record has unknown priority '{value}'")]
    UnknownPriority {
        /// Entity the caller attempted to translate.
        entity: EntityKind,
        /// Raw priority code received.
        value: String,
    },

    /// A date field could not be parsed.
    #[error("{entity} record has invalid date in '{field}': '{value}'")]
    InvalidDate {
        /// Entity the caller attempted to translate.
        entity: EntityKind,
        /// Wire name of the offending field.
        field: &'static str,
        /// Raw value received.
        value: String,
    },
}

/// Error raised while translating a whole snapshot of collections.
///
/// Wraps the first [`TranslationError`] encountered together with the
/// collection name and the record's position within it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{collection}[{index}]: {source}")]
pub struct SnapshotError {
    /// Name of the backend collection (`users`, `processes`, `tasks`).
    pub collection: &'static str,
    /// Zero-based index of the failing record.
    pub index: usize,
    /// Underlying translation failure.
    #[source]
    pub source: TranslationError,
}
