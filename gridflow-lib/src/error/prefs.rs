//! Preference-store error types

/// Errors from the persisted preference store.
///
/// Readers of preference state treat any of these as "no stored value";
/// they are logged, never surfaced to the user.
#[derive(Debug, thiserror::Error)]
pub enum PrefsError {
    #[error("database error: {0}")]
    Database(#[from] async_sqlite::Error),
    #[error("serialization error: {0}")]
    Serialization(bincode::Error),
    #[error("deserialization error: {0}")]
    Deserialization(bincode::Error),
}
