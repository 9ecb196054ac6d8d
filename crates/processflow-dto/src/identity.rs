//! Session-lifetime mapping between backend and frontend identifiers.
//!
//! The REST backend identifies records with opaque 24-character hexadecimal
//! strings. The dashboard works with small integers. [`IdentityMap`] records
//! the pairing in both directions, adding entries lazily the first time a
//! backend identifier is seen.
//!
//! # Derivation
//!
//! A new frontend identifier is derived from the last eight characters of
//! the backend identifier, read as a base-16 integer and reduced modulo
//! [`FRONTEND_ID_MODULUS`]. The derivation depends only on the identifier
//! value, so a fresh session maps the same backend ID to the same integer.
//! It is not collision-free: distinct backend IDs can share a frontend ID.
//! The newest backend ID wins reverse lookups and the collision is logged.
//!
//! # Degraded mode
//!
//! Lookups never fail. An unusable backend identifier resolves to
//! [`FrontendId::UNKNOWN`] and an unmapped frontend identifier resolves to
//! [`PLACEHOLDER_BACKEND_ID`]. Both cases emit a `warn` event. A backend
//! identifier whose tail reduces to zero cannot be told apart from the
//! sentinel, so it is treated as unusable and never recorded.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Number of trailing backend identifier characters used for derivation.
pub const DERIVATION_TAIL_LEN: usize = 8;

/// Modulus applied to the derived integer.
pub const FRONTEND_ID_MODULUS: u32 = 1_000_000;

/// Backend identifier returned when a frontend identifier has no mapping.
///
/// Shaped like a native backend identifier so it travels through payloads
/// unchanged, but never names a real record.
pub const PLACEHOLDER_BACKEND_ID: &str = "000000000000000000000000";

const TAIL_OFFSET_FROM_END: usize = DERIVATION_TAIL_LEN - 1;

/// Compact identifier used by dashboard records.
///
/// Serialises as a bare JSON number. Zero is reserved for "unknown".
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FrontendId(u32);

impl FrontendId {
    /// Sentinel for a reference that could not be resolved.
    pub const UNKNOWN: Self = Self(0);

    /// Wrap a raw frontend identifier.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns `true` for the [`FrontendId::UNKNOWN`] sentinel.
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for FrontendId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for FrontendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Records that carry a backend identifier.
///
/// Used by [`IdentityMap::reset_mappings`] to seed the map from a fetched
/// collection.
pub trait BackendIdentified {
    /// The record's backend identifier, if it carries a usable one.
    fn backend_id(&self) -> Option<&str>;
}

/// Derive a frontend identifier from a backend identifier.
///
/// Returns `None` when the identifier is shorter than
/// [`DERIVATION_TAIL_LEN`] characters or its tail is not hexadecimal.
///
/// # Examples
///
/// ```
/// use processflow_dto::{FrontendId, derive_frontend_id};
///
/// // 0xa8b90012 = 2_830_696_466
/// assert_eq!(
///     derive_frontend_id("64f1a2b3c4d5e6f7a8b90012"),
///     Some(FrontendId::new(696_466))
/// );
/// assert_eq!(derive_frontend_id("abc"), None);
/// ```
#[must_use]
pub fn derive_frontend_id(backend_id: &str) -> Option<FrontendId> {
    let (tail_start, _) = backend_id.char_indices().rev().nth(TAIL_OFFSET_FROM_END)?;
    let tail = backend_id.get(tail_start..)?;
    // from_str_radix tolerates a leading sign, so check digits explicitly.
    if !tail.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(tail, 16).ok()?;
    Some(FrontendId(value.rem_euclid(FRONTEND_ID_MODULUS)))
}

/// Bidirectional map between backend and frontend identifiers.
///
/// Construct one per session and hand it to the translators: mutably when
/// reading backend records, immutably when building backend payloads.
///
/// # Examples
///
/// ```
/// use processflow_dto::{FrontendId, IdentityMap, PLACEHOLDER_BACKEND_ID};
///
/// let mut map = IdentityMap::new();
/// let id = map.resolve_frontend_id("64f1a2b3c4d5e6f7a8b90012");
///
/// assert_eq!(id, map.resolve_frontend_id("64f1a2b3c4d5e6f7a8b90012"));
/// assert_eq!(map.resolve_backend_id(id), "64f1a2b3c4d5e6f7a8b90012");
/// assert_eq!(map.resolve_backend_id(FrontendId::new(7)), PLACEHOLDER_BACKEND_ID);
/// ```
#[derive(Debug, Clone, Default)]
pub struct IdentityMap {
    forward: HashMap<String, FrontendId>,
    reverse: HashMap<FrontendId, String>,
}

impl IdentityMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a backend identifier, recording a new mapping if needed.
    ///
    /// Returns [`FrontendId::UNKNOWN`] and logs a warning when the
    /// identifier cannot be derived from or derives to the sentinel itself.
    /// Nothing is recorded in either case.
    pub fn resolve_frontend_id(&mut self, backend_id: &str) -> FrontendId {
        if let Some(existing) = self.forward.get(backend_id) {
            return *existing;
        }
        let Some(derived) = derive_frontend_id(backend_id) else {
            warn!(
                backend_id = %backend_id,
                "invalid backend identifier; resolving to unknown frontend id"
            );
            return FrontendId::UNKNOWN;
        };
        if derived.is_unknown() {
            warn!(
                backend_id = %backend_id,
                "backend identifier derives to the unknown frontend id; not recorded"
            );
            return FrontendId::UNKNOWN;
        }
        self.record(backend_id, derived);
        derived
    }

    /// Resolve a frontend identifier back to its backend identifier.
    ///
    /// Returns [`PLACEHOLDER_BACKEND_ID`] and logs a warning for the unknown
    /// sentinel or an identifier this session has never produced.
    #[must_use]
    pub fn resolve_backend_id(&self, frontend_id: FrontendId) -> &str {
        if frontend_id.is_unknown() {
            warn!("unknown frontend identifier; using placeholder backend id");
            return PLACEHOLDER_BACKEND_ID;
        }
        self.reverse.get(&frontend_id).map_or_else(
            || {
                warn!(
                    frontend_id = frontend_id.get(),
                    "unmapped frontend identifier; using placeholder backend id"
                );
                PLACEHOLDER_BACKEND_ID
            },
            String::as_str,
        )
    }

    /// Clear every mapping, then eagerly map each supplied record.
    ///
    /// Typically called once with the authoritative user list so later
    /// references to those users are guaranteed hits. Records without an
    /// identifier are skipped.
    pub fn reset_mappings<'a, I, R>(&mut self, records: I)
    where
        I: IntoIterator<Item = &'a R>,
        R: BackendIdentified + 'a,
    {
        self.forward.clear();
        self.reverse.clear();
        for record in records {
            match record.backend_id() {
                Some(backend_id) => {
                    self.resolve_frontend_id(backend_id);
                }
                None => warn!("record without backend identifier skipped during reset"),
            }
        }
        debug!(mapped = self.forward.len(), "identity map reset");
    }

    /// Look up an existing mapping without recording a new one.
    #[must_use]
    pub fn frontend_id_for(&self, backend_id: &str) -> Option<FrontendId> {
        self.forward.get(backend_id).copied()
    }

    /// Number of backend identifiers recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Returns `true` when no backend identifier has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    fn record(&mut self, backend_id: &str, frontend_id: FrontendId) {
        if let Some(previous) = self.reverse.insert(frontend_id, backend_id.to_owned()) {
            warn!(
                frontend_id = frontend_id.get(),
                previous = %previous,
                backend_id = %backend_id,
                "frontend id collision; reverse lookups now return the newer backend id"
            );
        } else {
            debug!(
                frontend_id = frontend_id.get(),
                backend_id = %backend_id,
                "recorded identifier mapping"
            );
        }
        self.forward.insert(backend_id.to_owned(), frontend_id);
    }
}
