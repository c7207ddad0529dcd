//! Persisted preference store.
//!
//! Durably remembers per-table UI state (column visibility and the like)
//! across sessions, scoped by table identity plus filter context. Readers
//! treat a failing or corrupt backing store as always-empty, so
//! preference loss never breaks a table.

mod backend;
mod memory;
mod sqlite;

pub use backend::PreferenceBackend;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::PrefsError;

/// Typed preference provider.
///
/// Wraps a [`PreferenceBackend`] with typed serialization via bincode.
/// Concurrent writers to the same table/context pair are last-write-wins.
#[derive(Clone)]
pub struct PreferenceStore {
    backend: Arc<dyn PreferenceBackend>,
}

impl PreferenceStore {
    /// Create a new store with the given backend.
    pub fn new(backend: impl PreferenceBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Create a store backed only by process memory.
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Get the typed value stored for a table/context pair.
    pub async fn get<T: DeserializeOwned>(
        &self,
        table: &str,
        context: &str,
    ) -> Result<Option<T>, PrefsError> {
        match self.backend.load(table, context).await? {
            Some(bytes) => Ok(Some(
                bincode::deserialize(&bytes).map_err(PrefsError::Deserialization)?,
            )),
            None => Ok(None),
        }
    }

    /// Get a typed value, treating any store failure as absence.
    ///
    /// This is the read path the table engine uses: an unavailable or
    /// corrupt store degrades to the in-memory default.
    pub async fn get_or_empty<T: DeserializeOwned>(&self, table: &str, context: &str) -> Option<T> {
        match self.get(table, context).await {
            Ok(value) => value,
            Err(err) => {
                log::warn!("preference store read failed for {table}/{context}: {err}");
                None
            }
        }
    }

    /// Store a typed value for a table/context pair.
    pub async fn set<T: Serialize + Sync>(
        &self,
        table: &str,
        context: &str,
        value: &T,
    ) -> Result<(), PrefsError> {
        let bytes = bincode::serialize(value).map_err(PrefsError::Serialization)?;
        self.backend.save(table, context, bytes).await
    }
}
