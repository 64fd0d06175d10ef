//! Terminal User Interface for scry.
//!
//! Provides the main TUI application loop using ratatui and crossterm. The
//! loop is the interactive thread of the whole program: it renders frames,
//! feeds key events into the session, and drains the execution bridge's
//! outcome channel between frames. Store requests never run here.

pub mod app;
mod events;
mod ui;
pub mod widgets;

pub use app::App;
pub use events::{Event, EventHandler};

use std::io::{self, Stdout};
use std::panic;
use std::sync::Arc;

use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::info;

use crate::config::Config;
use crate::error::{Result, ScryError};
use crate::es::SearchClient;
use crate::query::QueryResult;
use crate::session::{Outcome, SessionController};

/// The main TUI application runner.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_handler: EventHandler,
}

impl Tui {
    /// Creates a new TUI instance, initializing the terminal.
    pub fn new() -> Result<Self> {
        let terminal = Self::setup_terminal()?;
        Ok(Self {
            terminal,
            event_handler: EventHandler::new(),
        })
    }

    /// Sets up the terminal for TUI rendering.
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()
            .map_err(|e| ScryError::internal(format!("Failed to enable raw mode: {e}")))?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)
            .map_err(|e| ScryError::internal(format!("Failed to enter alternate screen: {e}")))?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)
            .map_err(|e| ScryError::internal(format!("Failed to create terminal: {e}")))?;

        Ok(terminal)
    }

    /// Restores the terminal to its original state.
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()
            .map_err(|e| ScryError::internal(format!("Failed to disable raw mode: {e}")))?;

        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .map_err(|e| ScryError::internal(format!("Failed to leave alternate screen: {e}")))?;

        self.terminal
            .show_cursor()
            .map_err(|e| ScryError::internal(format!("Failed to show cursor: {e}")))?;

        Ok(())
    }

    /// Runs the main TUI event loop.
    pub async fn run(
        &mut self,
        mut session: SessionController,
        mut outcomes: mpsc::UnboundedReceiver<Outcome<QueryResult>>,
        connection_info: String,
    ) -> Result<()> {
        // Set up panic hook to restore terminal on panic
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            original_hook(panic_info);
        }));

        let mut app = App::new(connection_info);

        loop {
            app.set_busy(session.is_running());

            // Pull-based snapshot: the session does no rendering itself.
            let view = session.current_view();
            self.terminal
                .draw(|frame| ui::render(frame, &app, &view))
                .map_err(|e| ScryError::internal(format!("Failed to draw: {e}")))?;

            if !app.running {
                break;
            }

            // Wait for whichever comes first: a terminal event (polled off
            // the interactive thread) or a request outcome.
            let handler = self.event_handler;
            tokio::select! {
                event_result = tokio::task::spawn_blocking(move || handler.next()) => {
                    match event_result {
                        Ok(Ok(event)) => Self::handle_event(event, &mut app, &mut session),
                        Ok(Err(e)) => return Err(e),
                        Err(e) => {
                            return Err(ScryError::internal(format!("Event task failed: {e}")))
                        }
                    }
                }

                Some(outcome) = outcomes.recv() => {
                    session.handle_outcome(outcome);
                    app.reset_scroll();
                }
            }
        }

        // Restore panic hook
        let _ = panic::take_hook();

        Ok(())
    }

    /// Handles a terminal event.
    fn handle_event(event: Event, app: &mut App, session: &mut SessionController) {
        match event {
            Event::Key(key) => Self::handle_key(key, app, session),
            Event::Resize(_, _) => {
                // Terminal resize is handled automatically by ratatui
            }
            Event::Tick => {
                // Nothing to do; the redraw at the top of the loop animates
                // the spinner.
            }
        }
    }

    /// Handles a key event.
    fn handle_key(key: KeyEvent, app: &mut App, session: &mut SessionController) {
        match key.code {
            // Exit commands
            KeyCode::Char('c') | KeyCode::Char('q')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                app.running = false;
            }

            // Time range cycling
            KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                session.cycle_time_range();
            }

            // Page navigation
            KeyCode::PageDown => {
                session.next_page();
                app.reset_scroll();
            }
            KeyCode::PageUp => {
                session.previous_page();
                app.reset_scroll();
            }

            // Query submission. An empty input is rejected without a request
            // being issued; there is nothing to show for it.
            KeyCode::Enter => {
                if session.submit_query(&app.input.text).is_ok() {
                    app.reset_scroll();
                }
            }

            KeyCode::Esc => {
                app.input.clear();
            }

            // Result scrolling
            KeyCode::Up => app.scroll_up(),
            KeyCode::Down => app.scroll_down(),

            // Everything else edits the input line
            _ => app.handle_input_key(key),
        }
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

/// Runs the TUI application against a connected store client.
pub async fn run(client: Arc<dyn SearchClient>, config: &Config) -> Result<()> {
    let (session, outcomes) = SessionController::new(client, &config.query);
    let connection_info = config.elasticsearch.display_string();

    info!("Starting TUI");
    let mut tui = Tui::new()?;
    tui.run(session, outcomes, connection_info).await
}
