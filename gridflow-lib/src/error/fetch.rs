//! Row-fetch error types

/// Errors reported by a row source while fetching a page of rows.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The fetch was cancelled before it completed.
    ///
    /// A cancelled fetch is never surfaced to the user; the controller
    /// discards it silently because a newer request has taken over.
    #[error("fetch cancelled")]
    Cancelled,

    /// Network-level or application-level failure from the backend.
    #[error("backend error: {0}")]
    Backend(String),

    /// The response arrived but lacked a field the table needs.
    #[error("missing expected field in response: {0}")]
    MissingField(String),
}

impl FetchError {
    /// Creates a backend error from any displayable cause.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }

    /// Returns `true` if this error came from cancellation rather than a
    /// real failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
