//! Environment variable handling
//!
//! Turns decrypted `.env` content into an ordered list of [`EnvVar`]s,
//! formats them as shell statements, and overlays them onto a process
//! environment for child commands.

pub mod overlay;
pub mod parser;
pub mod script;

pub use overlay::EnvOverlay;
pub use parser::parse;
pub use script::{export_script, format_export_line, format_unset_line, unset_script};

/// One key/value row of a `.env` file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVar {
    pub key: String,
    pub value: String,
    /// Text of the comment line directly above the entry, or empty
    pub comment: String,
    /// Whether this entry is applied; only the selector changes it
    pub enabled: bool,
}

impl EnvVar {
    /// Create an enabled entry with no comment
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            comment: String::new(),
            enabled: true,
        }
    }

    /// Attach a comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// Count the enabled entries
pub fn count_enabled(vars: &[EnvVar]) -> usize {
    vars.iter().filter(|v| v.enabled).count()
}

/// Mark every entry enabled
pub fn enable_all(vars: &mut [EnvVar]) {
    for var in vars.iter_mut() {
        var.enabled = true;
    }
}
