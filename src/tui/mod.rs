//! Interactive variable selector
//!
//! A checklist over the decrypted entries. The state machine lives in
//! [`session`] and knows nothing about terminals; [`render`] turns it into
//! text lines, and [`provider`] picks a front end to drive it.

pub mod event;
pub mod keybindings;
pub mod provider;
pub mod render;
pub mod session;
pub mod terminal;
pub mod theme;

pub use provider::{
    new_provider, select_env_vars, HeadlessProvider, ProviderKind, ScriptedProvider,
    SelectionProvider, TerminalProvider,
};
pub use session::{resolve_selection, SelectionEvent, SelectionSession, SessionOutcome, SessionState};
pub use theme::{Theme, ThemeName};
