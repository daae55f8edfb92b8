//! Session snapshot persistence.
//!
//! The session is saved as one JSON value under [`SNAPSHOT_KEY`] inside a
//! small key-value file, wrapped as `{"state": ..., "version": 0}`.
//! Persistence hangs off the store as a [`Subscriber`], so store logic is
//! testable without any storage at all.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use super::session::ShoppingSession;
use super::{Mutation, Subscriber};

/// Key the shopping session is stored under.
pub const SNAPSHOT_KEY: &str = "luxe-store-storage";

/// Current snapshot layout version.
pub const SNAPSHOT_VERSION: u32 = 0;

/// Errors reading or writing snapshots.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Reading or writing the snapshot file failed.
    #[error("snapshot I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The snapshot could not be encoded or decoded.
    #[error("snapshot encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Envelope around the persisted session.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedState {
    state: ShoppingSession,
    #[serde(default)]
    version: u32,
}

/// Durable key-value storage for session snapshots.
pub trait SnapshotStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read or decoded.
    fn load(&self, key: &str) -> Result<Option<Value>, PersistError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn save(&mut self, key: &str, value: Value) -> Result<(), PersistError>;
}

// =============================================================================
// File Store
// =============================================================================

/// Snapshot store backed by a single JSON object file.
///
/// Writes go to a sibling temporary file first and are renamed into place,
/// so a crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    /// Use the file at `path`. The file is created on first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> PersistError {
        PersistError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_map(&self) -> Result<Map<String, Value>, PersistError> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(Map::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self, key: &str) -> Result<Option<Value>, PersistError> {
        Ok(self.read_map()?.remove(key))
    }

    fn save(&mut self, key: &str, value: Value) -> Result<(), PersistError> {
        // A corrupt file is replaced rather than blocking every later save.
        let mut map = self.read_map().unwrap_or_else(|e| {
            warn!(error = %e, path = %self.path.display(), "Discarding unreadable snapshot file");
            Map::new()
        });
        map.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec(&map)?).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;
        Ok(())
    }
}

// =============================================================================
// Memory Store
// =============================================================================

/// In-memory snapshot store. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    entries: Arc<Mutex<HashMap<String, Value>>>,
}

impl MemorySnapshotStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been stored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self, key: &str) -> Result<Option<Value>, PersistError> {
        Ok(self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn save(&mut self, key: &str, value: Value) -> Result<(), PersistError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value);
        Ok(())
    }
}

// =============================================================================
// Load / Save
// =============================================================================

/// Read the persisted session, if one exists.
///
/// Duplicate cart lines are merged, zero-quantity lines dropped and
/// duplicate wishlist entries removed before the session is returned.
///
/// # Errors
///
/// Returns an error if the snapshot exists but cannot be read or decoded.
pub fn load_session(store: &impl SnapshotStore) -> Result<Option<ShoppingSession>, PersistError> {
    let Some(value) = store.load(SNAPSHOT_KEY)? else {
        return Ok(None);
    };
    let persisted: PersistedState = serde_json::from_value(value)?;
    if persisted.version != SNAPSHOT_VERSION {
        debug!(version = persisted.version, "Loading snapshot from another version");
    }
    let mut session = persisted.state;
    if session.normalize() {
        warn!("Repaired duplicate or empty entries in shopping session snapshot");
    }
    Ok(Some(session))
}

/// Write the session snapshot.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be encoded or written.
pub fn save_session(
    store: &mut impl SnapshotStore,
    session: &ShoppingSession,
) -> Result<(), PersistError> {
    let value = serde_json::to_value(PersistedState {
        state: session.clone(),
        version: SNAPSHOT_VERSION,
    })?;
    store.save(SNAPSHOT_KEY, value)
}

/// Subscriber that snapshots the session after every committed mutation.
///
/// Write failures are logged and otherwise ignored; the in-memory session
/// stays authoritative.
#[derive(Debug)]
pub struct Persister<S> {
    store: S,
}

impl<S: SnapshotStore> Persister<S> {
    /// Persist into `store`.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: SnapshotStore> Subscriber for Persister<S> {
    fn on_commit(&mut self, session: &ShoppingSession, mutation: Mutation) {
        if let Err(e) = save_session(&mut self.store, session) {
            warn!(error = %e, mutation = mutation.as_str(), "Failed to persist shopping session");
        }
    }
}
