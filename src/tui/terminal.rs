//! Terminal setup and teardown
//!
//! This module handles initializing and restoring the terminal state,
//! including setting up the panic hook to restore the terminal on crash.
//!
//! The selector draws on stderr. Stdout carries the generated script and
//! is often captured by `eval "$(envault export ...)"`.

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io::{self, Stderr};
use std::panic;

use crate::error::{EnvaultError, EnvaultResult};

use super::event::EventSource;
use super::render;
use super::session::{SelectionSession, SessionOutcome};
use super::theme::Theme;

/// Type alias for our terminal
pub type Tui = Terminal<CrosstermBackend<Stderr>>;

fn tui_error(context: &str, err: impl std::fmt::Display) -> EnvaultError {
    EnvaultError::Tui(format!("{}: {}", context, err))
}

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> EnvaultResult<Tui> {
    // Set up panic hook to restore terminal on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before printing panic info
        let _ = restore_terminal_impl();
        original_hook(panic_info);
    }));

    // Enable raw mode and enter alternate screen
    enable_raw_mode().map_err(|e| tui_error("Failed to enable raw mode", e))?;
    let mut stderr = io::stderr();
    undo_on_error(execute!(stderr, EnterAlternateScreen, Hide), || {
        let _ = restore_terminal_impl();
    })
    .map_err(|e| tui_error("Failed to enter alternate screen", e))?;

    // Create terminal
    let backend = CrosstermBackend::new(stderr);
    undo_on_error(Terminal::new(backend), || {
        let _ = restore_terminal_impl();
    })
    .map_err(|e| tui_error("Failed to create terminal", e))
}

/// Pass `result` through, running `undo` first if it is an error
fn undo_on_error<T, E>(result: Result<T, E>, undo: impl FnOnce()) -> Result<T, E> {
    if result.is_err() {
        undo();
    }
    result
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> EnvaultResult<()> {
    restore_terminal_impl().map_err(|e| tui_error("Failed to restore terminal", e))
}

/// Internal implementation of terminal restoration
fn restore_terminal_impl() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stderr(), Show, LeaveAlternateScreen)?;
    Ok(())
}

/// Run a session until it is confirmed or cancelled
///
/// Each event is applied and the view redrawn before the next event is read.
pub fn run_session<B, E>(
    terminal: &mut Terminal<B>,
    events: &mut E,
    mut session: SelectionSession,
    theme: &Theme,
) -> EnvaultResult<SessionOutcome>
where
    B: Backend,
    E: EventSource,
{
    loop {
        // Render
        terminal
            .draw(|frame| render::draw(frame, &session, theme))
            .map_err(|e| tui_error("Failed to draw", e))?;

        // Handle events
        let Some(event) = events.next()?.to_selection() else {
            continue;
        };

        if session.handle(event).is_terminal() {
            break;
        }
    }

    session
        .into_outcome()
        .ok_or_else(|| EnvaultError::Tui("Session ended while still running".to_string()))
}
