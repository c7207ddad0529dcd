//! SQLite preference backend.

use std::path::Path;

use async_sqlite::Client;
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use super::PreferenceBackend;
use crate::error::PrefsError;

/// SQLite-backed preference storage.
///
/// One row per table/context pair, stamped with the last write time so an
/// operator can tell stale contexts from live ones. Reads go through a
/// process-memory cache: visibility state is loaded once per table mount
/// but written on every toggle, and the cache keeps toggles off the
/// database thread.
pub struct SqliteBackend {
    client: Client,
    cache: DashMap<(String, String), Vec<u8>>,
}

impl SqliteBackend {
    /// Open (or create) a preference database at the given path.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, PrefsError> {
        let client = async_sqlite::ClientBuilder::new()
            .path(path)
            .open()
            .await?;

        client
            .conn(|conn| {
                conn.execute(
                    "CREATE TABLE IF NOT EXISTS table_prefs (
                        table_id TEXT NOT NULL,
                        context TEXT NOT NULL,
                        value BLOB NOT NULL,
                        updated_at TEXT NOT NULL,
                        PRIMARY KEY (table_id, context)
                    )",
                    [],
                )
            })
            .await?;

        Ok(Self {
            client,
            cache: DashMap::new(),
        })
    }
}

#[async_trait]
impl PreferenceBackend for SqliteBackend {
    async fn load(&self, table: &str, context: &str) -> Result<Option<Vec<u8>>, PrefsError> {
        let key = (table.to_string(), context.to_string());
        if let Some(value) = self.cache.get(&key) {
            return Ok(Some(value.clone()));
        }

        let (table_id, context_owned) = key.clone();
        let result = self
            .client
            .conn(move |conn| {
                conn.query_row(
                    "SELECT value FROM table_prefs WHERE table_id = ?1 AND context = ?2",
                    rusqlite::params![&table_id, &context_owned],
                    |row| row.get::<_, Vec<u8>>(0),
                )
                .map(Some)
                .or_else(|err| match err {
                    rusqlite::Error::QueryReturnedNoRows => Ok(None),
                    other => Err(other),
                })
            })
            .await?;

        if let Some(ref value) = result {
            self.cache.insert(key, value.clone());
        }

        Ok(result)
    }

    async fn save(&self, table: &str, context: &str, value: Vec<u8>) -> Result<(), PrefsError> {
        let table_id = table.to_string();
        let context_owned = context.to_string();
        let value_clone = value.clone();
        let stamped_at = Utc::now().to_rfc3339();

        self.client
            .conn(move |conn| {
                conn.execute(
                    "INSERT INTO table_prefs (table_id, context, value, updated_at)
                     VALUES (?1, ?2, ?3, ?4)
                     ON CONFLICT(table_id, context)
                     DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                    rusqlite::params![&table_id, &context_owned, &value_clone, &stamped_at],
                )
            })
            .await?;

        self.cache
            .insert((table.to_string(), context.to_string()), value);

        Ok(())
    }
}
