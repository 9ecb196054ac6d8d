//! File-to-file snapshot translation.
//!
//! The `processflow-translate` binary delegates to these functions so the
//! whole read, translate and write flow can be exercised in tests without
//! spawning a process.

mod error;

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tracing::info;

use crate::atomic_io::write_atomic;
use crate::config::TranslateSettings;
use crate::identity::IdentityMap;
use crate::snapshot::{BackendSnapshot, FrontendSnapshot, translate_snapshot};

pub use error::CliError;

/// Input and output locations for one translation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateRequest {
    /// Backend snapshot to read.
    pub input: Utf8PathBuf,
    /// Where to write the dashboard snapshot; `None` means the caller prints
    /// it.
    pub output: Option<Utf8PathBuf>,
}

/// Record counts of a translated snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Users translated.
    pub users: usize,
    /// Processes translated.
    pub processes: usize,
    /// Tasks translated.
    pub tasks: usize,
}

impl Summary {
    fn of(snapshot: &FrontendSnapshot) -> Self {
        Self {
            users: snapshot.usuarios.len(),
            processes: snapshot.processos.len(),
            tasks: snapshot.tarefas.len(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Translated {} users, {} processes, {} tasks",
            self.users, self.processes, self.tasks
        )
    }
}

/// Outcome of a translation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Record counts.
    pub summary: Summary,
    /// Rendered dashboard snapshot JSON.
    pub rendered: String,
}

/// Read, translate and optionally write a snapshot.
///
/// When `request.output` is set the rendered JSON is written there
/// atomically; it is returned either way.
///
/// # Errors
///
/// Returns [`CliError`] when the input cannot be read or parsed, a record
/// fails to translate, or the output cannot be written.
///
/// # Example
///
/// ```
/// use camino::Utf8PathBuf;
/// use processflow_dto::TranslateSettings;
/// use processflow_dto::translate_cli::{TranslateRequest, run};
///
/// let dir = Utf8PathBuf::from("target").join("processflow-doc");
/// std::fs::create_dir_all(&dir).expect("create dir");
/// let input = dir.join(format!("snapshot-{}.json", std::process::id()));
/// std::fs::write(&input, r#"{"users": [], "processes": [], "tasks": []}"#)
///     .expect("write input");
///
/// let settings = TranslateSettings {
///     pretty: None,
///     seed_from_users: None,
///     log_format: None,
/// };
/// let request = TranslateRequest { input: input.clone(), output: None };
/// let translation = run(&request, &settings).expect("translate");
///
/// assert_eq!(translation.rendered, r#"{"usuarios":[],"processos":[],"tarefas":[]}"#);
/// std::fs::remove_file(&input).expect("clean up");
/// ```
pub fn run(
    request: &TranslateRequest,
    settings: &TranslateSettings,
) -> Result<Translation, CliError> {
    let snapshot = read_snapshot(&request.input)?;
    let mut map = IdentityMap::new();
    let translated = translate_snapshot(&mut map, snapshot, settings.mapping_seed())?;
    let summary = Summary::of(&translated);
    let rendered = render_snapshot(&translated, settings.pretty())?;

    if let Some(output) = &request.output {
        write_output(output, &rendered)?;
        info!(
            path = %output,
            users = summary.users,
            processes = summary.processes,
            tasks = summary.tasks,
            "dashboard snapshot written"
        );
    }

    Ok(Translation { summary, rendered })
}

/// Read and decode a backend snapshot file.
///
/// # Errors
///
/// Returns [`CliError::Read`] or [`CliError::Parse`].
pub fn read_snapshot(path: &Utf8Path) -> Result<BackendSnapshot, CliError> {
    let read_error = |message: String| CliError::Read {
        path: path.to_path_buf(),
        message,
    };
    let (dir, file_name) = open_parent(path).map_err(read_error)?;
    let contents = dir
        .read_to_string(file_name)
        .map_err(|err| read_error(err.to_string()))?;
    serde_json::from_str(&contents).map_err(|err| CliError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

/// Serialise a dashboard snapshot, compact or pretty.
///
/// # Errors
///
/// Returns [`CliError::Render`] if serialisation fails.
pub fn render_snapshot(snapshot: &FrontendSnapshot, pretty: bool) -> Result<String, CliError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(snapshot)
    } else {
        serde_json::to_string(snapshot)
    };
    rendered.map_err(|err| CliError::Render {
        message: err.to_string(),
    })
}

fn write_output(path: &Utf8Path, rendered: &str) -> Result<(), CliError> {
    let write_error = |message: String| CliError::Write {
        path: path.to_path_buf(),
        message,
    };
    let (dir, file_name) = open_parent(path).map_err(write_error)?;
    write_atomic(&dir, Utf8Path::new(file_name), rendered)
        .map_err(|err| write_error(err.to_string()))
}

/// Open the directory containing `path` and return it with the file name.
fn open_parent(path: &Utf8Path) -> Result<(Dir, &str), String> {
    let file_name = path
        .file_name()
        .ok_or_else(|| "path does not name a file".to_owned())?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|err| err.to_string())?;
    Ok((dir, file_name))
}

#[cfg(test)]
mod tests;
