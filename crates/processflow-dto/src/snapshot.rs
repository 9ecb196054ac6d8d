//! Whole-dashboard translation of the three backend collections.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::SnapshotError;
use crate::frontend::{Processo, Tarefa, User};
use crate::identity::IdentityMap;
use crate::translate::{
    ProcessTranslator, RecordTranslator, TaskTranslator, UserTranslator, decode_record,
    translate_value,
};

/// Raw documents fetched from `/users`, `/processes` and `/tasks`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendSnapshot {
    /// User documents.
    #[serde(default)]
    pub users: Vec<Value>,
    /// Process documents.
    #[serde(default)]
    pub processes: Vec<Value>,
    /// Task documents.
    #[serde(default)]
    pub tasks: Vec<Value>,
}

/// Dashboard state built from a [`BackendSnapshot`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontendSnapshot {
    /// Translated users.
    pub usuarios: Vec<User>,
    /// Translated processes.
    pub processos: Vec<Processo>,
    /// Translated tasks.
    pub tarefas: Vec<Tarefa>,
}

/// How the identity map is prepared before a snapshot is translated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MappingSeed {
    /// Reset the map and seed it from the snapshot's users.
    #[default]
    FromUsers,
    /// Keep whatever mappings the map already holds.
    Keep,
}

/// Translate every collection of a snapshot.
///
/// Users go first so responsible and assignee references hit their
/// mappings; processes precede tasks for the same reason.
///
/// # Errors
///
/// Returns the first [`SnapshotError`], naming the collection and index of
/// the record that failed.
///
/// # Examples
///
/// ```
/// use processflow_dto::{BackendSnapshot, IdentityMap, MappingSeed, translate_snapshot};
/// use serde_json::json;
///
/// let snapshot: BackendSnapshot = serde_json::from_value(json!({
///     "users": [{
///         "_id": "650c1f7e9d3b2a1c00f4a1b2",
///         "username": "ana",
///         "name": "Ana Souza",
///         "email": "ana@example.com"
///     }],
///     "tasks": [{
///         "_id": "650c1f7e9d3b2a1c00f4a1e5",
///         "title": "Revisar contrato",
///         "assignee": "650c1f7e9d3b2a1c00f4a1b2"
///     }]
/// }))
/// .expect("snapshot");
///
/// let mut map = IdentityMap::new();
/// let state = translate_snapshot(&mut map, snapshot, MappingSeed::FromUsers)
///     .expect("translate");
///
/// assert_eq!(state.tarefas[0].responsavel_id, state.usuarios[0].id);
/// ```
pub fn translate_snapshot(
    map: &mut IdentityMap,
    snapshot: BackendSnapshot,
    seed: MappingSeed,
) -> Result<FrontendSnapshot, SnapshotError> {
    let BackendSnapshot {
        users,
        processes,
        tasks,
    } = snapshot;

    let decoded_users = users
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            decode_record::<UserTranslator>(raw).map_err(|source| SnapshotError {
                collection: "users",
                index,
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if seed == MappingSeed::FromUsers {
        map.reset_mappings(&decoded_users);
    }

    let usuarios = decoded_users
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            UserTranslator::backend_to_frontend(map, record).map_err(|source| SnapshotError {
                collection: "users",
                index,
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let processos = translate_collection::<ProcessTranslator>(map, "processes", processes)?;
    let tarefas = translate_collection::<TaskTranslator>(map, "tasks", tasks)?;

    debug!(
        users = usuarios.len(),
        processes = processos.len(),
        tasks = tarefas.len(),
        mapped = map.len(),
        "snapshot translated"
    );
    Ok(FrontendSnapshot {
        usuarios,
        processos,
        tarefas,
    })
}

fn translate_collection<T: RecordTranslator>(
    map: &mut IdentityMap,
    collection: &'static str,
    records: Vec<Value>,
) -> Result<Vec<T::Frontend>, SnapshotError> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            translate_value::<T>(map, raw).map_err(|source| SnapshotError {
                collection,
                index,
                source,
            })
        })
        .collect()
}
