//! UI rendering for the TUI.
//!
//! Defines the layout and renders all UI components from the app state and
//! the session's view snapshot.

use super::app::App;
use super::widgets::{header::Header, input::QueryInput, status::StatusBar, table::ResultsTable};
use crate::session::ViewSnapshot;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

/// Renders the entire UI.
pub fn render(frame: &mut Frame, app: &App, view: &ViewSnapshot) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(3), // Query input
            Constraint::Min(3),    // Results
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let header_area = main_layout[0];
    let input_area = main_layout[1];
    let results_area = main_layout[2];
    let status_area = main_layout[3];

    frame.render_widget(
        Header::new(&app.connection_info, app.spinner.as_ref()),
        header_area,
    );

    frame.render_widget(
        QueryInput::new(&app.input.text, app.input.cursor, view.dialect),
        input_area,
    );

    frame.render_widget(ResultsTable::new(&view.table, app.result_scroll), results_area);

    frame.render_widget(StatusBar::new(view), status_area);

    // Position the cursor in the input field.
    // Account for border (1) and prompt "> " (2).
    let cursor_x = input_area.x + 1 + 2 + app.input.cursor as u16;
    let cursor_y = input_area.y + 1;
    frame.set_cursor_position((cursor_x, cursor_y));
}
