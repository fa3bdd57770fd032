//! Event handling for the TUI
//!
//! The selector reads one terminal event at a time and blocks until it
//! arrives. There is no background thread, tick or timeout.

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};

use crate::error::{EnvaultError, EnvaultResult};

use super::keybindings;
use super::session::SelectionEvent;

/// Terminal events the selector cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Terminal resize (columns, rows)
    Resize(u16, u16),
}

impl Event {
    /// Translate into a selector event, if the input means anything
    pub fn to_selection(&self) -> Option<SelectionEvent> {
        match self {
            Event::Key(key) => keybindings::map_key(key),
            Event::Resize(width, height) => Some(SelectionEvent::Resize {
                width: *width,
                height: *height,
            }),
        }
    }
}

/// A blocking source of terminal events
pub trait EventSource {
    /// Wait for the next event
    fn next(&mut self) -> EnvaultResult<Event>;
}

/// Reads events from the real terminal through crossterm
#[derive(Debug, Default)]
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next(&mut self) -> EnvaultResult<Event> {
        loop {
            let raw = event::read()
                .map_err(|e| EnvaultError::Tui(format!("Failed to read event: {}", e)))?;

            match raw {
                CrosstermEvent::Key(key) => return Ok(Event::Key(key)),
                CrosstermEvent::Resize(width, height) => return Ok(Event::Resize(width, height)),
                // Mouse, focus and paste events are not used
                _ => {}
            }
        }
    }
}

/// Replays a fixed list of events; drives `ScriptedProvider` and the loop tests
#[derive(Debug, Default)]
pub struct ReplayEvents {
    events: std::collections::VecDeque<Event>,
}

impl ReplayEvents {
    pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }
}

impl EventSource for ReplayEvents {
    /// Yields the queued events, then a cancel key once they run out
    fn next(&mut self) -> EnvaultResult<Event> {
        Ok(self.events.pop_front().unwrap_or_else(|| {
            Event::Key(KeyEvent::new(
                crossterm::event::KeyCode::Esc,
                crossterm::event::KeyModifiers::NONE,
            ))
        }))
    }
}
