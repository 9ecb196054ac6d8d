//! Error types for the snapshot translation driver.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::error::SnapshotError;

/// Errors surfaced while reading, translating or writing a snapshot file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    /// The input file could not be opened or read.
    #[error("failed to read {path}: {message}")]
    Read {
        /// Path that was being read.
        path: Utf8PathBuf,
        /// I/O error message.
        message: String,
    },
    /// The input file is not a backend snapshot.
    #[error("failed to parse {path}: {message}")]
    Parse {
        /// Path that was being parsed.
        path: Utf8PathBuf,
        /// Decoder error message.
        message: String,
    },
    /// A record in the snapshot could not be translated.
    #[error("translation failed at {source}")]
    Snapshot {
        /// Underlying snapshot error.
        #[from]
        #[source]
        source: SnapshotError,
    },
    /// The translated snapshot could not be serialised.
    #[error("failed to render output: {message}")]
    Render {
        /// Encoder error message.
        message: String,
    },
    /// The output file could not be written.
    #[error("failed to write {path}: {message}")]
    Write {
        /// Path that was being written.
        path: Utf8PathBuf,
        /// I/O error message.
        message: String,
    },
}
