//! Preference backend trait.

use async_trait::async_trait;

use crate::error::PrefsError;

/// Backend trait for per-table preference storage.
///
/// Preferences are scoped by table identity plus a context string (the
/// active filter context, usually), so the same table remembers its
/// visibility independently per context. Implementations handle raw byte
/// storage; the [`PreferenceStore`](super::PreferenceStore) wraps this
/// with typed serialization.
#[async_trait]
pub trait PreferenceBackend: Send + Sync {
    /// Load the stored bytes for a table/context pair.
    async fn load(&self, table: &str, context: &str) -> Result<Option<Vec<u8>>, PrefsError>;

    /// Store bytes for a table/context pair, replacing any previous value.
    async fn save(&self, table: &str, context: &str, value: Vec<u8>) -> Result<(), PrefsError>;
}
