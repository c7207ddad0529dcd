//! Download serialization for visible table data.

use chrono::DateTime;
use chrono::Utc;

use super::cell_value;
use crate::error::ExportError;
use crate::model::ColumnDescriptor;
use crate::model::NodeRow;

/// Result of serializing rows for download.
///
/// A row whose embedded payload fails to parse is skipped and reported in
/// `failures`; the remaining rows still export. Hosts surface failures as
/// an export-specific message, distinct from fetch errors.
#[derive(Debug)]
pub struct ExportOutput {
    /// The delimiter-separated text blob, header row included.
    pub content: String,
    /// Per-row failures, in input order.
    pub failures: Vec<ExportError>,
}

impl ExportOutput {
    /// Whether every row exported cleanly.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Serialize the visible columns of the given rows.
///
/// Cells are joined by `delimiter`; embedded delimiter and newline
/// characters inside a cell are flattened to spaces so the blob stays
/// rectangular.
pub fn export_rows(
    columns: &[&ColumnDescriptor],
    rows: &[NodeRow],
    delimiter: char,
) -> ExportOutput {
    let mut failures = Vec::new();
    let mut lines = Vec::with_capacity(rows.len() + 1);

    let header: Vec<String> = columns
        .iter()
        .map(|c| clean_cell(&c.label, delimiter))
        .collect();
    lines.push(header.join(&delimiter.to_string()));

    for row in rows {
        let props = match row.props_object() {
            Ok(props) => props,
            Err(err) => {
                failures.push(err);
                continue;
            }
        };
        let cells: Vec<String> = columns
            .iter()
            .map(|c| clean_cell(&cell_value(row, &props, &c.key), delimiter))
            .collect();
        lines.push(cells.join(&delimiter.to_string()));
    }

    ExportOutput {
        content: lines.join("\n"),
        failures,
    }
}

/// Build a download filename from submission name, node type, and
/// timestamp.
///
/// Segments are sanitized by collapsing every character outside
/// `[A-Za-z0-9-]` to `-`, collapsing runs, and trimming leading/trailing
/// separators; an empty or whitespace-only name degrades to an empty
/// segment rather than erroring.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use gridflow_lib::assemble::export_filename;
///
/// let at = Utc.with_ymd_and_hms(2015, 2, 27, 23, 23, 19).unwrap();
/// assert_eq!(
///     export_filename("non $alpha name $@!819", "sample", at),
///     "non-alpha-name-819_sample_201502272323.tsv",
/// );
/// ```
pub fn export_filename(
    submission_name: &str,
    node_type: &str,
    timestamp: DateTime<Utc>,
) -> String {
    format!(
        "{}_{}_{}.tsv",
        sanitize_segment(submission_name),
        sanitize_segment(node_type),
        timestamp.format("%Y%m%d%H%M"),
    )
}

fn sanitize_segment(input: &str) -> String {
    let mapped: String = input
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect();

    let mut collapsed = String::with_capacity(mapped.len());
    for c in mapped.chars() {
        if c == '-' && collapsed.ends_with('-') {
            continue;
        }
        collapsed.push(c);
    }
    collapsed.trim_matches('-').to_string()
}

fn clean_cell(value: &str, delimiter: char) -> String {
    value
        .chars()
        .map(|c| {
            if c == delimiter || c == '\n' || c == '\r' {
                ' '
            } else {
                c
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::sanitize_segment;

    #[test]
    fn collapses_runs_and_trims() {
        assert_eq!(sanitize_segment("non $alpha name $@!819"), "non-alpha-name-819");
        assert_eq!(sanitize_segment("   "), "");
        assert_eq!(sanitize_segment("---"), "");
        assert_eq!(sanitize_segment("plain"), "plain");
    }
}
