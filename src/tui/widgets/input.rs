//! Query input widget for the TUI.
//!
//! Provides a single-line text input with cursor support. The dialect of the
//! active query is shown in the box title once classification has happened.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Calculates the scroll offset needed to keep the cursor visible.
///
/// Returns the number of characters to skip from the start of the text.
pub fn calculate_scroll_offset(cursor: usize, available_width: usize) -> usize {
    if cursor <= available_width {
        0
    } else {
        cursor.saturating_sub(available_width)
    }
}

/// Query input widget.
pub struct QueryInput<'a> {
    text: &'a str,
    cursor: usize,
    dialect: Option<&'a str>,
}

impl<'a> QueryInput<'a> {
    /// Creates a new query input widget.
    pub fn new(text: &'a str, cursor: usize, dialect: Option<&'a str>) -> Self {
        Self {
            text,
            cursor,
            dialect,
        }
    }
}

impl Widget for QueryInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.dialect {
            Some(dialect) => format!(" Query ({dialect}) "),
            None => " Query ".to_string(),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title);

        let prompt_style = Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD);

        // Border left (1) + prompt "> " (2) + border right (1) + cursor (1)
        let available_width = area.width.saturating_sub(5) as usize;
        let scroll_offset = calculate_scroll_offset(self.cursor, available_width);

        let visible_text = if scroll_offset < self.text.len() {
            &self.text[scroll_offset..]
        } else {
            ""
        };

        let line = Line::from(vec![
            Span::styled("> ", prompt_style),
            Span::raw(visible_text),
        ]);

        Paragraph::new(line).block(block).render(area, buf);
    }
}
