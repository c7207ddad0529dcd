//! Column descriptors and the column identity trait.

use super::CellComparator;

/// Identity and visibility metadata for a table column.
///
/// The visibility engine works against this trait rather than a concrete
/// struct, so hosts with their own column types plug in by implementing
/// key extraction themselves. Keys must be unique within one table
/// instance.
pub trait TableColumn {
    /// Stable identity of the column within its table.
    fn key(&self) -> &str;

    /// Header text shown to the user.
    fn label(&self) -> &str;

    /// Whether the user may hide this column. Non-hideable columns are
    /// pinned visible regardless of stored state.
    fn hideable(&self) -> bool {
        true
    }

    /// Whether the column starts hidden in the default model.
    fn default_hidden(&self) -> bool {
        false
    }

    /// Display group this column belongs to, if the table buckets its
    /// column toggles.
    fn group(&self) -> Option<&str> {
        None
    }
}

/// Column configuration for engine-owned tables.
///
/// # Examples
///
/// ```
/// use gridflow_lib::model::ColumnDescriptor;
///
/// let columns = vec![
///     ColumnDescriptor::new("id", "ID").pinned(),
///     ColumnDescriptor::new("status", "Status"),
///     ColumnDescriptor::new("notes", "Notes").hidden_by_default(),
/// ];
/// ```
#[derive(Debug, Clone)]
pub struct ColumnDescriptor {
    /// Stable column key.
    pub key: String,
    /// Column header text.
    pub label: String,
    /// Whether the user may hide this column.
    pub hideable: bool,
    /// Whether the column starts hidden.
    pub default_hidden: bool,
    /// Whether header clicks should not sort by this column.
    pub sort_disabled: bool,
    /// Display group, if the table buckets its column toggles.
    pub group: Option<String>,
    /// Client-side comparator over rendered cell values, if any.
    pub comparator: Option<CellComparator>,
}

impl ColumnDescriptor {
    /// Create a new hideable, default-visible column.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            hideable: true,
            default_hidden: false,
            sort_disabled: false,
            group: None,
            comparator: None,
        }
    }

    /// Pin the column visible: the user cannot hide it.
    pub fn pinned(mut self) -> Self {
        self.hideable = false;
        self
    }

    /// Start the column hidden in the default model.
    pub fn hidden_by_default(mut self) -> Self {
        self.default_hidden = true;
        self
    }

    /// Disable header-click sorting for this column.
    pub fn no_sort(mut self) -> Self {
        self.sort_disabled = true;
        self
    }

    /// Assign the column to a display group.
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Set a client-side comparator.
    pub fn with_comparator(mut self, comparator: CellComparator) -> Self {
        self.comparator = Some(comparator);
        self
    }
}

impl TableColumn for ColumnDescriptor {
    fn key(&self) -> &str {
        &self.key
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn hideable(&self) -> bool {
        self.hideable
    }

    fn default_hidden(&self) -> bool {
        self.default_hidden
    }

    fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }
}
