//! Selection front ends
//!
//! [`SelectionProvider`] is the seam between the state machine and whatever
//! presents it. The CLI asks [`ProviderKind::detect`] for the right one and
//! goes through [`select_env_vars`], which applies the post-session policy.

use std::io::IsTerminal;

use crate::env::EnvVar;
use crate::error::{EnvaultError, EnvaultResult};

use super::event::{CrosstermEvents, Event, ReplayEvents};
use super::session::{
    resolve_selection, SelectionEvent, SelectionSession, SessionOutcome, DEFAULT_HEIGHT,
    DEFAULT_WIDTH,
};
use super::terminal;
use super::theme::Theme;

/// Something that can run a selection session over a list of entries
pub trait SelectionProvider {
    /// Present the entries and return how the session ended
    fn present(&mut self, entries: Vec<EnvVar>) -> EnvaultResult<SessionOutcome>;
}

/// Available front ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Full-screen checklist on the controlling terminal
    Terminal,
    /// No UI: everything is confirmed as-is
    Headless,
}

impl ProviderKind {
    /// Use the terminal front end only when stdin and stderr are both TTYs
    pub fn detect() -> Self {
        if std::io::stdin().is_terminal() && std::io::stderr().is_terminal() {
            Self::Terminal
        } else {
            Self::Headless
        }
    }
}

/// Create a provider of the given kind
pub fn new_provider(
    kind: ProviderKind,
    theme: Theme,
    show_full_help: bool,
) -> Box<dyn SelectionProvider> {
    match kind {
        ProviderKind::Terminal => Box::new(TerminalProvider::new(theme, show_full_help)),
        ProviderKind::Headless => Box::new(HeadlessProvider),
    }
}

/// Run a provider and apply the post-session policy
///
/// Cancelling, or confirming with nothing enabled, returns every entry
/// enabled so an accidental escape never drops the whole environment.
pub fn select_env_vars(
    provider: &mut dyn SelectionProvider,
    entries: Vec<EnvVar>,
) -> EnvaultResult<Vec<EnvVar>> {
    let outcome = provider.present(entries)?;

    match &outcome {
        SessionOutcome::Confirmed(list) => {
            tracing::debug!(
                total = list.len(),
                enabled = crate::env::count_enabled(list),
                "selection confirmed"
            );
        }
        SessionOutcome::Cancelled(list) => {
            tracing::debug!(total = list.len(), "selection cancelled, applying all");
        }
    }

    Ok(resolve_selection(outcome))
}

/// crossterm + ratatui checklist
pub struct TerminalProvider {
    theme: Theme,
    show_full_help: bool,
}

impl TerminalProvider {
    pub fn new(theme: Theme, show_full_help: bool) -> Self {
        Self {
            theme,
            show_full_help,
        }
    }
}

impl SelectionProvider for TerminalProvider {
    fn present(&mut self, entries: Vec<EnvVar>) -> EnvaultResult<SessionOutcome> {
        let (width, height) =
            crossterm::terminal::size().unwrap_or((DEFAULT_WIDTH, DEFAULT_HEIGHT));
        let session =
            SelectionSession::new(entries, width, height).with_full_help(self.show_full_help);

        let mut tui = terminal::init_terminal()?;
        let result = terminal::run_session(&mut tui, &mut CrosstermEvents, session, &self.theme);

        // Always restore, even when the loop failed
        terminal::restore_terminal()?;
        result
    }
}

/// Confirms immediately with every entry enabled
#[derive(Debug, Default)]
pub struct HeadlessProvider;

impl SelectionProvider for HeadlessProvider {
    fn present(&mut self, entries: Vec<EnvVar>) -> EnvaultResult<SessionOutcome> {
        tracing::warn!("no terminal available for selection, applying all variables");
        let mut session = SelectionSession::new(entries, DEFAULT_WIDTH, DEFAULT_HEIGHT);
        session.handle(SelectionEvent::Confirm);
        Ok(SessionOutcome::Confirmed(session.entries().to_vec()))
    }
}

/// Replays scripted input against the state machine without drawing
///
/// Running out of input counts as cancelling.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    events: Vec<Event>,
    width: u16,
    height: u16,
}

impl ScriptedProvider {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }

    /// Terminal size the session starts with
    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

impl SelectionProvider for ScriptedProvider {
    fn present(&mut self, entries: Vec<EnvVar>) -> EnvaultResult<SessionOutcome> {
        use super::event::EventSource;

        let mut session = SelectionSession::new(entries, self.width, self.height);
        let mut source = ReplayEvents::new(std::mem::take(&mut self.events));

        loop {
            if let Some(event) = source.next()?.to_selection() {
                if session.handle(event).is_terminal() {
                    break;
                }
            }
        }

        session
            .into_outcome()
            .ok_or_else(|| EnvaultError::Tui("Session ended while still running".to_string()))
    }
}
