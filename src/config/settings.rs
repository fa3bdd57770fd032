//! User settings for envault
//!
//! Stored as JSON in the config directory. Every field has a default, so a
//! missing file or a file from an older version still loads.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::EnvaultPaths;
use crate::error::{EnvaultError, EnvaultResult};
use crate::tui::theme::{Theme, ThemeName};

/// User settings for envault
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// File name of the vault written next to the .env file
    #[serde(default = "default_vault_file_name")]
    pub vault_file_name: String,

    /// Shell started by `export --new-shell`
    #[serde(default = "default_shell")]
    pub shell: String,

    /// Selector colours
    #[serde(default)]
    pub theme: ThemeName,

    /// Start the selector with the full help expanded
    #[serde(default)]
    pub show_full_help: bool,

    /// Where generated scripts go (system temp dir when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_dir: Option<PathBuf>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_vault_file_name() -> String {
    ".env.vaulted".to_string()
}

fn default_shell() -> String {
    "/bin/bash".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            vault_file_name: default_vault_file_name(),
            shell: default_shell(),
            theme: ThemeName::default(),
            show_full_help: false,
            script_dir: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &EnvaultPaths) -> EnvaultResult<Self> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                EnvaultError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                EnvaultError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk, creating the config directory if needed
    pub fn save(&self, paths: &EnvaultPaths) -> EnvaultResult<()> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| EnvaultError::Io(format!("Failed to write settings file: {}", e)))
    }

    /// Theme to draw the selector with, honouring `NO_COLOR`
    pub fn theme(&self) -> Theme {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        self.resolve_theme(no_color)
    }

    fn resolve_theme(&self, no_color: bool) -> Theme {
        if no_color {
            Theme::plain()
        } else {
            self.theme.theme()
        }
    }
}
