//! Status bar widget for the TUI.
//!
//! One line at the bottom of the screen: session status or error text on the
//! left, the active time range and key hints on the right. A failed query
//! recolors the bar but leaves the previous results on screen above it.

use crate::session::{Status, ViewSnapshot};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Key hints shown on the right of the status bar.
const HINTS: &str = "^T time · PgUp/PgDn page · ^C quit";

/// Status bar widget.
pub struct StatusBar<'a> {
    view: &'a ViewSnapshot,
}

impl<'a> StatusBar<'a> {
    /// Creates a new status bar for the given view snapshot.
    pub fn new(view: &'a ViewSnapshot) -> Self {
        Self { view }
    }

    /// Builds the left-hand status text.
    fn status_text(&self) -> String {
        match self.view.status {
            Status::Error => {
                let message = self.view.error_message.as_deref().unwrap_or("query failed");
                format!(" ✗ {}", truncate_message(message, 120))
            }
            Status::Running => " ⏳ Executing query...".to_string(),
            Status::Idle => match &self.view.page_indicator {
                Some(indicator) => format!(" {indicator}"),
                None => " Ready".to_string(),
            },
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = match self.view.status {
            Status::Error => Style::default().bg(Color::Red).fg(Color::White),
            _ => Style::default().bg(Color::Blue).fg(Color::White),
        };

        for x in area.left()..area.right() {
            buf[(x, area.y)].set_style(style);
        }

        buf.set_string(area.x, area.y, self.status_text(), style);

        let right_text = format!(" {} | {HINTS} ", self.view.time_range);
        let right_width = right_text.chars().count() as u16;
        if right_width < area.width {
            let right_x = area.right().saturating_sub(right_width);
            buf.set_string(right_x, area.y, &right_text, style);
        }
    }
}

/// Truncates long error messages but keeps them readable.
fn truncate_message(message: &str, max_len: usize) -> String {
    if message.chars().count() <= max_len {
        message.to_string()
    } else {
        let mut out: String = message.chars().take(max_len.saturating_sub(3)).collect();
        out.push_str("...");
        out
    }
}
