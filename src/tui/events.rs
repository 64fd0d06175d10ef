//! Event handling for the TUI.
//!
//! Processes keyboard and terminal events using crossterm.

use crate::error::{Result, ScryError};
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use std::time::Duration;

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// A periodic tick (for spinner animation and outcome draining).
    Tick,
}

/// Handles terminal events.
///
/// `next` blocks for at most the tick rate, so the caller runs it off the
/// interactive thread and treats the timeout as an animation tick.
#[derive(Debug, Clone, Copy)]
pub struct EventHandler {
    /// Timeout for polling events.
    tick_rate: Duration,
}

impl EventHandler {
    /// Creates a new event handler with the default tick rate.
    pub fn new() -> Self {
        Self {
            tick_rate: Duration::from_millis(100),
        }
    }

    /// Creates a new event handler with a custom tick rate.
    #[allow(dead_code)]
    pub fn with_tick_rate(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Polls for the next event, blocking up to the tick rate.
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.tick_rate)
            .map_err(|e| ScryError::internal(format!("Failed to poll events: {e}")))?
        {
            let event = event::read()
                .map_err(|e| ScryError::internal(format!("Failed to read event: {e}")))?;

            match event {
                CrosstermEvent::Key(key) => Ok(Event::Key(key)),
                CrosstermEvent::Resize(width, height) => Ok(Event::Resize(width, height)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
