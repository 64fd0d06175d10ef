//! Results table widget for the TUI.
//!
//! Renders a formatted table (already column- and width-capped by the column
//! formatter) with box-drawing borders and a vertical scroll offset.

use crate::format::FormattedTable;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Minimum width for any column.
const MIN_COLUMN_WIDTH: usize = 4;

/// Widget for rendering formatted query results.
pub struct ResultsTable<'a> {
    table: &'a FormattedTable,
    scroll: usize,
}

impl<'a> ResultsTable<'a> {
    /// Creates a new results table widget.
    pub fn new(table: &'a FormattedTable, scroll: usize) -> Self {
        Self { table, scroll }
    }

    /// Calculates the width for each column from its widest cell.
    fn calculate_column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .table
            .columns
            .iter()
            .map(|col| col.chars().count().max(MIN_COLUMN_WIDTH))
            .collect();

        for row in &self.table.rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.chars().count());
                }
            }
        }

        widths
    }

    /// Renders the table to lines, applying the scroll offset to data rows.
    pub fn render_to_lines(&self) -> Vec<Line<'a>> {
        let mut lines = Vec::new();

        if self.table.columns.is_empty() {
            lines.push(Line::from(Span::styled(
                "(no results)",
                Style::default().fg(Color::DarkGray),
            )));
            return lines;
        }

        let widths = self.calculate_column_widths();

        lines.push(self.render_border(&widths, '┌', '┬', '┐'));
        lines.push(self.render_header_row(&widths));
        lines.push(self.render_border(&widths, '├', '┼', '┤'));

        let scroll = self.scroll.min(self.table.rows.len().saturating_sub(1));
        for row in self.table.rows.iter().skip(scroll) {
            lines.push(self.render_data_row(row, &widths));
        }

        lines.push(self.render_border(&widths, '└', '┴', '┘'));

        lines
    }

    /// Renders a horizontal border line.
    fn render_border(&self, widths: &[usize], left: char, mid: char, right: char) -> Line<'a> {
        let mut border = String::new();
        border.push(left);

        for (i, &width) in widths.iter().enumerate() {
            border.push_str(&"─".repeat(width + 2));
            if i < widths.len() - 1 {
                border.push(mid);
            }
        }

        border.push(right);

        Line::from(Span::styled(border, Style::default().fg(Color::DarkGray)))
    }

    /// Renders the header row with column names.
    fn render_header_row(&self, widths: &[usize]) -> Line<'a> {
        let mut spans = Vec::new();
        spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));

        for (i, col) in self.table.columns.iter().enumerate() {
            let width = widths.get(i).copied().unwrap_or(MIN_COLUMN_WIDTH);
            let padded = format!(" {col:<width$} ");

            spans.push(Span::styled(
                padded,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
        }

        Line::from(spans)
    }

    /// Renders a data row.
    fn render_data_row(&self, row: &[String], widths: &[usize]) -> Line<'a> {
        let mut spans = Vec::new();
        spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));

        for (i, &width) in widths.iter().enumerate() {
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            let padded = format!(" {cell:<width$} ");

            let style = if cell.is_empty() {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };

            spans.push(Span::styled(padded, style));
            spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
        }

        Line::from(spans)
    }
}

impl Widget for ResultsTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = self.render_to_lines();

        for (i, line) in lines.iter().enumerate() {
            if i >= area.height as usize {
                break;
            }
            let y = area.y + i as u16;
            buf.set_line(area.x, y, line, area.width);
        }
    }
}
