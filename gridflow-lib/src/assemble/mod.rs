//! Related-node and export data assemblers.
//!
//! Columns for related-node tables come from the server-declared ordered
//! property list of the query, never from introspecting row payloads, so
//! the column set stays stable even when individual rows omit sparse
//! fields.

mod export;

pub use export::export_filename;
pub use export::export_rows;
pub use export::ExportOutput;

use serde_json::Value;

use crate::model::ColumnDescriptor;
use crate::model::NodeRow;

/// Key and label of the synthetic validation-status column inserted into
/// every assembled table.
pub const STATUS_COLUMN: &str = "Status";

/// Property pinned third for data-file tables.
const ORPHANED_COLUMN: &str = "Orphaned";

/// Node type with the special identifier/Status/Orphaned ordering.
const DATA_FILE_NODE_TYPE: &str = "data file";

/// Build table columns from a server-declared property list.
///
/// The declared id property moves to the front and is pinned visible; a
/// synthetic `Status` column goes second. For the `"data file"` node type
/// (case-insensitive) `Orphaned` is pinned third. All remaining properties
/// follow in their declared order and are hideable.
pub fn assemble_columns(
    properties: &[String],
    id_property: &str,
    node_type: &str,
) -> Vec<ColumnDescriptor> {
    let mut front: Vec<&str> = vec![id_property, STATUS_COLUMN];
    if node_type.eq_ignore_ascii_case(DATA_FILE_NODE_TYPE) {
        front.push(ORPHANED_COLUMN);
    }

    let mut columns = Vec::with_capacity(properties.len() + 1);
    columns.push(ColumnDescriptor::new(id_property, id_property).pinned());
    for &key in &front[1..] {
        columns.push(ColumnDescriptor::new(key, key));
    }
    for property in properties {
        if front.iter().any(|&f| f == property) {
            continue;
        }
        columns.push(ColumnDescriptor::new(property, property));
    }
    columns
}

/// Render one cell of a node row for display or export.
///
/// `Status` reads the row's reported status; everything else comes from
/// the parsed property payload. Missing and null properties render empty.
pub fn cell_value(row: &NodeRow, props: &serde_json::Map<String, Value>, key: &str) -> String {
    if key == STATUS_COLUMN {
        return row.status.clone().unwrap_or_default();
    }
    match props.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
