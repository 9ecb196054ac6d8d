//! Identity mapping and record translation for the ProcessFlow dashboard.
//!
//! The REST backend identifies records with 24-character hexadecimal
//! strings and speaks an English, `UPPER_SNAKE_CASE` vocabulary. The
//! dashboard works with small integer identifiers and Portuguese field
//! names. This crate converts between the two.
//!
//! # Overview
//!
//! - [`IdentityMap`] derives a stable integer for every backend identifier
//!   it sees and remembers the reverse direction for outgoing payloads.
//! - [`UserTranslator`], [`ProcessTranslator`] and [`TaskTranslator`]
//!   implement [`RecordTranslator`] for full records coming in and partial
//!   records going out.
//! - [`translate_snapshot`] translates the three collections in dependency
//!   order, and [`translate_cli`] wraps that in a file-to-file driver.
//!
//! # Example
//!
//! ```
//! use processflow_dto::{
//!     IdentityMap, ProcessTranslator, RecordTranslator, Status, decode_patch, translate_value,
//! };
//! use serde_json::json;
//!
//! let mut map = IdentityMap::new();
//! let processo = translate_value::<ProcessTranslator>(
//!     &mut map,
//!     json!({
//!         "_id": "650c1f7e9d3b2a1c00f4a1d4",
//!         "title": "Onboarding de fornecedores",
//!         "status": "EM_ANDAMENTO",
//!         "responsible": "650c1f7e9d3b2a1c00f4a1b2"
//!     }),
//! )
//! .expect("valid process");
//! assert_eq!(processo.status, Status::EmAndamento);
//!
//! let patch = decode_patch::<ProcessTranslator>(json!({
//!     "responsavelId": processo.responsavel_id.get(),
//!     "status": "concluido"
//! }))
//! .expect("valid patch");
//! let payload = ProcessTranslator::frontend_to_backend(&map, patch).expect("translate");
//!
//! assert_eq!(
//!     serde_json::to_value(payload).expect("serialise"),
//!     json!({"status": "CONCLUIDO", "responsible": "650c1f7e9d3b2a1c00f4a1b2"})
//! );
//! ```

mod atomic_io;
mod backend;
mod config;
mod error;
mod frontend;
mod identity;
mod snapshot;
mod translate;
pub mod translate_cli;
mod vocabulary;

pub use backend::{
    BackendProcess, BackendProcessPatch, BackendRef, BackendTask, BackendTaskPatch, BackendUser,
    BackendUserPatch, EmbeddedRef,
};
pub use config::{LogFormat, TranslateSettings, UnknownLogFormat};
pub use error::{EntityKind, SnapshotError, TranslationError};
pub use frontend::{Processo, ProcessoPatch, Tarefa, TarefaPatch, User, UserPatch};
pub use identity::{
    BackendIdentified, DERIVATION_TAIL_LEN, FRONTEND_ID_MODULUS, FrontendId, IdentityMap,
    PLACEHOLDER_BACKEND_ID, derive_frontend_id,
};
pub use snapshot::{BackendSnapshot, FrontendSnapshot, MappingSeed, translate_snapshot};
pub use translate::{
    ProcessTranslator, RecordTranslator, TaskTranslator, UserTranslator, decode_patch,
    decode_record, translate_value,
};
pub use vocabulary::{DEFAULT_GROUP_LABEL, Priority, RecordKind, Status, TipoUsuario, UserRole};
