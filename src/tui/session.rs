//! Selection session state machine
//!
//! A [`SelectionSession`] owns the entry list for one interactive run. Every
//! [`SelectionEvent`] is applied to completion before the next one, and after
//! each event `viewport_offset <= cursor < viewport_offset + viewport_height`
//! holds. Once the session is confirmed or cancelled further events are
//! ignored.

use crate::env::{self, EnvVar};

/// Rows used by everything except the list: title, blank, blank, two help rows
pub const CHROME_ROWS: u16 = 5;

/// Terminal size assumed until the first resize event
pub const DEFAULT_WIDTH: u16 = 80;
pub const DEFAULT_HEIGHT: u16 = 30;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Running,
    Confirmed,
    Cancelled,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Input to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    First,
    Last,
    Toggle,
    /// Switch between short and full key help
    ToggleHelp,
    /// Terminal size in columns and rows
    Resize { width: u16, height: u16 },
    Confirm,
    Cancel,
}

/// How a session ended, with the entries as they were at that moment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Confirmed(Vec<EnvVar>),
    Cancelled(Vec<EnvVar>),
}

/// State of one interactive selection run
#[derive(Debug, Clone)]
pub struct SelectionSession {
    entries: Vec<EnvVar>,
    cursor: usize,
    viewport_offset: usize,
    viewport_height: usize,
    width: u16,
    show_full_help: bool,
    state: SessionState,
}

impl SelectionSession {
    /// Start a session sized for a `width` x `height` terminal
    ///
    /// Every entry starts enabled.
    pub fn new(mut entries: Vec<EnvVar>, width: u16, height: u16) -> Self {
        env::enable_all(&mut entries);
        Self {
            entries,
            cursor: 0,
            viewport_offset: 0,
            viewport_height: viewport_rows(height),
            width,
            show_full_help: false,
            state: SessionState::Running,
        }
    }

    /// Start with the full key help showing
    pub fn with_full_help(mut self, show: bool) -> Self {
        self.show_full_help = show;
        self
    }

    pub fn entries(&self) -> &[EnvVar] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn viewport_offset(&self) -> usize {
        self.viewport_offset
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn show_full_help(&self) -> bool {
        self.show_full_help
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Number of enabled entries
    pub fn enabled_count(&self) -> usize {
        env::count_enabled(&self.entries)
    }

    /// Index range of the entries inside the viewport
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        let start = self.viewport_offset.min(self.entries.len());
        let end = (self.viewport_offset + self.viewport_height).min(self.entries.len());
        start..end
    }

    /// Apply one event and return the resulting state
    pub fn handle(&mut self, event: SelectionEvent) -> SessionState {
        if self.state.is_terminal() {
            return self.state;
        }

        match event {
            SelectionEvent::MoveUp => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.scroll_to_cursor();
                }
            }
            SelectionEvent::MoveDown => {
                if self.cursor + 1 < self.entries.len() {
                    self.cursor += 1;
                    self.scroll_to_cursor();
                }
            }
            SelectionEvent::PageUp => {
                self.cursor = self.cursor.saturating_sub(self.viewport_height);
                self.scroll_to_cursor();
            }
            SelectionEvent::PageDown => {
                let last = self.entries.len().saturating_sub(1);
                self.cursor = (self.cursor + self.viewport_height).min(last);
                self.scroll_to_cursor();
            }
            SelectionEvent::First => {
                self.cursor = 0;
                self.scroll_to_cursor();
            }
            SelectionEvent::Last => {
                self.cursor = self.entries.len().saturating_sub(1);
                self.scroll_to_cursor();
            }
            SelectionEvent::Toggle => {
                if let Some(entry) = self.entries.get_mut(self.cursor) {
                    entry.enabled = !entry.enabled;
                }
            }
            SelectionEvent::ToggleHelp => {
                self.show_full_help = !self.show_full_help;
            }
            SelectionEvent::Resize { width, height } => {
                self.width = width;
                self.viewport_height = viewport_rows(height);
                self.scroll_to_cursor();
                // Don't leave blank rows under the last entry when a taller
                // window could show more of the list
                let max_offset = self.entries.len().saturating_sub(self.viewport_height);
                self.viewport_offset = self.viewport_offset.min(max_offset);
            }
            SelectionEvent::Confirm => {
                self.state = SessionState::Confirmed;
            }
            SelectionEvent::Cancel => {
                self.state = SessionState::Cancelled;
            }
        }

        self.state
    }

    /// Consume a finished session
    ///
    /// Returns `None` while the session is still running.
    pub fn into_outcome(self) -> Option<SessionOutcome> {
        match self.state {
            SessionState::Running => None,
            SessionState::Confirmed => Some(SessionOutcome::Confirmed(self.entries)),
            SessionState::Cancelled => Some(SessionOutcome::Cancelled(self.entries)),
        }
    }

    /// Shift the viewport the minimum amount needed to contain the cursor
    fn scroll_to_cursor(&mut self) {
        if self.cursor < self.viewport_offset {
            self.viewport_offset = self.cursor;
        } else if self.cursor >= self.viewport_offset + self.viewport_height {
            self.viewport_offset = self.cursor + 1 - self.viewport_height;
        }
    }
}

/// List rows available in a terminal of `height` rows, at least one
pub fn viewport_rows(height: u16) -> usize {
    usize::from(height.saturating_sub(CHROME_ROWS).max(1))
}

/// Apply the post-session policy
///
/// A cancelled session, or a confirmed one with nothing enabled, means no
/// filtering was requested: every entry comes back enabled. Otherwise the
/// confirmed entries are returned as they are.
pub fn resolve_selection(outcome: SessionOutcome) -> Vec<EnvVar> {
    match outcome {
        SessionOutcome::Confirmed(entries) if env::count_enabled(&entries) > 0 => entries,
        SessionOutcome::Confirmed(mut entries) | SessionOutcome::Cancelled(mut entries) => {
            env::enable_all(&mut entries);
            entries
        }
    }
}
