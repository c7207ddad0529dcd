//! Export error types

/// Errors raised while serializing rows for download.
///
/// Export failures are per-row and distinct from fetch failures: a bad row
/// is skipped and reported, and the remaining rows still export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// A row's embedded property payload was not valid JSON.
    #[error("row {id}: embedded payload is not valid JSON: {source}")]
    MalformedRow {
        /// Identifier of the row that failed to parse.
        id: String,
        #[source]
        source: serde_json::Error,
    },

    /// A row's embedded payload parsed but was not a JSON object.
    #[error("row {id}: embedded payload is not a JSON object")]
    NotAnObject {
        /// Identifier of the offending row.
        id: String,
    },
}

impl ExportError {
    /// Returns the identifier of the row this error refers to.
    pub fn row_id(&self) -> &str {
        match self {
            Self::MalformedRow { id, .. } => id,
            Self::NotAnObject { id } => id,
        }
    }
}
