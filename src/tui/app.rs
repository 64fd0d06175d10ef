//! UI state for the TUI.
//!
//! Holds the pieces of state that belong to the terminal itself: the input
//! line, the result scroll position, and the spinner. Query and result state
//! live in the session controller, which the renderer polls each tick.

use super::widgets::spinner::Spinner;

/// Input state for text editing.
#[derive(Debug, Default)]
pub struct InputState {
    /// Current input text.
    pub text: String,
    /// Cursor position (character index).
    pub cursor: usize,
}

impl InputState {
    /// Creates a new empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.text.remove(self.cursor);
        }
    }

    /// Deletes the character at the cursor (delete key).
    pub fn delete(&mut self) {
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
        }
    }

    /// Moves the cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor += 1;
        }
    }

    /// Moves the cursor to the start of the input.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Moves the cursor to the end of the input.
    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Clears the input.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Returns true if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Terminal-side application state.
pub struct App {
    /// Whether the application is still running.
    pub running: bool,
    /// Query input field state.
    pub input: InputState,
    /// Vertical scroll offset into the result table.
    pub result_scroll: usize,
    /// Store connection info for the header.
    pub connection_info: String,
    /// Spinner shown while a request is in flight.
    pub spinner: Option<Spinner>,
}

impl App {
    /// Creates a new App instance.
    pub fn new(connection_info: impl Into<String>) -> Self {
        Self {
            running: true,
            input: InputState::new(),
            result_scroll: 0,
            connection_info: connection_info.into(),
            spinner: None,
        }
    }

    /// Scrolls the result view up.
    pub fn scroll_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    /// Scrolls the result view down. Clamping against the row count happens
    /// at render time.
    pub fn scroll_down(&mut self) {
        self.result_scroll = self.result_scroll.saturating_add(1);
    }

    /// Resets the scroll position, called when a new result arrives or the
    /// page changes.
    pub fn reset_scroll(&mut self) {
        self.result_scroll = 0;
    }

    /// Keeps the spinner in sync with the session status.
    pub fn set_busy(&mut self, busy: bool) {
        match (busy, self.spinner.is_some()) {
            (true, false) => self.spinner = Some(Spinner::searching()),
            (false, true) => self.spinner = None,
            _ => {}
        }
    }

    /// Handles key events for the input line.
    pub fn handle_input_key(&mut self, key: crossterm::event::KeyEvent) {
        use crossterm::event::KeyCode;

        match key.code {
            KeyCode::Char(c) => self.input.insert(c),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            _ => {}
        }
    }
}
