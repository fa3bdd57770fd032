//! Path management for envault
//!
//! ## Path Resolution Order
//!
//! 1. `ENVAULT_CONFIG_DIR` environment variable (if set)
//! 2. The platform config directory from `directories`
//!    (`~/.config/envault` on Linux, `~/Library/Application Support/envault`
//!    on macOS, `%APPDATA%\envault\config` on Windows)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{EnvaultError, EnvaultResult};

/// Overrides the config directory
pub const CONFIG_DIR_ENV: &str = "ENVAULT_CONFIG_DIR";

/// Manages all paths used by envault
#[derive(Debug, Clone)]
pub struct EnvaultPaths {
    base_dir: PathBuf,
}

impl EnvaultPaths {
    /// Resolve the config directory
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> EnvaultResult<Self> {
        let base_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("", "", "envault")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    EnvaultError::Config("Could not determine a home directory".into())
                })?,
        };

        tracing::debug!(base_dir = %base_dir.display(), "resolved config directory");
        Ok(Self { base_dir })
    }

    /// Create EnvaultPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Create the config directory if needed
    pub fn ensure_directories(&self) -> EnvaultResult<()> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            EnvaultError::Io(format!(
                "Failed to create config directory {}: {}",
                self.base_dir.display(),
                e
            ))
        })
    }
}
