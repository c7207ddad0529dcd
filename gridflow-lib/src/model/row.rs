//! Row identity and the dynamic node row.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::error::ExportError;

/// Stable row identity.
///
/// Selection is keyed on this identifier, never on array index, so it
/// survives re-fetches and re-sorts of the same logical rows.
pub trait RowKey {
    /// Returns the row's unique identifier.
    fn row_id(&self) -> &str;
}

impl RowKey for String {
    fn row_id(&self) -> &str {
        self
    }
}

/// A dynamic row as returned by the submission backend.
///
/// Property values arrive as one embedded JSON object string per row
/// rather than typed fields, because the property set is declared by the
/// server per node type. Parsing is deferred until a cell is actually
/// rendered or exported, so one malformed row cannot take down a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRow {
    /// Unique, re-fetch-stable identifier.
    pub id: String,
    /// Logical node type, e.g. `"sample"` or `"data file"`.
    pub node_type: String,
    /// Validation status, if the backend reported one.
    pub status: Option<String>,
    /// Embedded JSON object with the row's property values.
    pub props: String,
}

impl NodeRow {
    /// Creates a row with an empty property payload.
    pub fn new(id: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
            status: None,
            props: "{}".to_string(),
        }
    }

    /// Sets the validation status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the embedded property payload.
    pub fn with_props(mut self, props: impl Into<String>) -> Self {
        self.props = props.into();
        self
    }

    /// Parses the embedded property payload into a JSON object.
    pub fn props_object(&self) -> Result<Map<String, Value>, ExportError> {
        let value: Value =
            serde_json::from_str(&self.props).map_err(|source| ExportError::MalformedRow {
                id: self.id.clone(),
                source,
            })?;
        match value {
            Value::Object(map) => Ok(map),
            _ => Err(ExportError::NotAnObject {
                id: self.id.clone(),
            }),
        }
    }
}

impl RowKey for NodeRow {
    fn row_id(&self) -> &str {
        &self.id
    }
}
