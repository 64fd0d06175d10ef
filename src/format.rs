//! Column formatting for result tables.
//!
//! Pure translation from raw result rows to fixed-width display cells.
//! Results keep their raw values until this point; the caps here bound what
//! any single render can cost, no matter what shape of document comes back.

use crate::query::Row;

/// Maximum number of columns ever shown.
pub const MAX_COLUMNS: usize = 10;

/// Maximum display width of any cell, in characters.
pub const MAX_CELL_WIDTH: usize = 20;

/// Display-ready table: header cells plus row cells, all width-capped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattedTable {
    /// Header cells, aligned with each row's cells.
    pub columns: Vec<String>,
    /// One vector of cells per row.
    pub rows: Vec<Vec<String>>,
}

/// Formats result rows for display.
///
/// Columns that are empty in every row are dropped first (wide log documents
/// routinely carry fields only some hits populate), then the column cap and
/// per-cell width cap are applied. Column order is preserved.
pub fn format_rows(columns: &[String], rows: &[Row]) -> FormattedTable {
    let kept: Vec<&String> = prune_empty_columns(columns, rows);
    let visible = &kept[..kept.len().min(MAX_COLUMNS)];

    let header: Vec<String> = visible.iter().map(|c| truncate_cell(c.as_str())).collect();
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            visible
                .iter()
                .map(|col| {
                    let text = row
                        .get(col.as_str())
                        .map(|v| v.to_display_string())
                        .unwrap_or_default();
                    truncate_cell(&text)
                })
                .collect()
        })
        .collect();

    FormattedTable {
        columns: header,
        rows: body,
    }
}

/// Drops columns whose value is blank in every row.
///
/// When every column is blank (or there are no rows) the original set is
/// kept, so an empty page still renders its headers.
fn prune_empty_columns<'a>(columns: &'a [String], rows: &[Row]) -> Vec<&'a String> {
    if rows.is_empty() {
        return columns.iter().collect();
    }

    let kept: Vec<&String> = columns
        .iter()
        .filter(|col| {
            rows.iter().any(|row| {
                row.get(col.as_str())
                    .is_some_and(|v| !v.to_display_string().trim().is_empty())
            })
        })
        .collect();

    if kept.is_empty() {
        columns.iter().collect()
    } else {
        kept
    }
}

/// Caps a cell at `MAX_CELL_WIDTH` display characters, marking truncation
/// with an ellipsis. Control characters are flattened to spaces so multi-line
/// values stay on one table row.
fn truncate_cell(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();

    if cleaned.chars().count() <= MAX_CELL_WIDTH {
        cleaned
    } else {
        let mut cell: String = cleaned.chars().take(MAX_CELL_WIDTH - 1).collect();
        cell.push('…');
        cell
    }
}
