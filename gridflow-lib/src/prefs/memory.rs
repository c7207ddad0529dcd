//! In-memory preference backend.

use async_trait::async_trait;
use dashmap::DashMap;

use super::PreferenceBackend;
use crate::error::PrefsError;

/// Process-memory preference storage.
///
/// Used as the graceful-degradation fallback when no durable store is
/// available, and as the backend of choice in tests.
#[derive(Default)]
pub struct MemoryBackend {
    values: DashMap<(String, String), Vec<u8>>,
}

impl MemoryBackend {
    /// Create an empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceBackend for MemoryBackend {
    async fn load(&self, table: &str, context: &str) -> Result<Option<Vec<u8>>, PrefsError> {
        let key = (table.to_string(), context.to_string());
        Ok(self.values.get(&key).map(|v| v.clone()))
    }

    async fn save(&self, table: &str, context: &str, value: Vec<u8>) -> Result<(), PrefsError> {
        self.values
            .insert((table.to_string(), context.to_string()), value);
        Ok(())
    }
}
