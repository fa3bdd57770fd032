//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the codec, parser and selector.

pub mod config;
pub mod dump;
pub mod encrypt;
pub mod export;
pub mod password;

use std::path::PathBuf;

use clap::Args;

use crate::config::Settings;
use crate::crypto::{self, SecureBytes};
use crate::error::EnvaultResult;
use crate::storage;

pub use config::{handle_config_command, ConfigArgs};
pub use dump::handle_dump_command;
pub use encrypt::{handle_encrypt_command, EncryptArgs, EncryptOptions};
pub use export::{handle_export_command, handle_unset_command, run_with_env, ExportArgs, UnsetArgs};

/// Options shared by every command that touches a vault
#[derive(Args, Debug, Clone, Default)]
pub struct VaultArgs {
    /// Read the password from the first line of stdin
    #[arg(long)]
    pub password_stdin: bool,

    /// Vault file to use (defaults to .env.vaulted)
    #[arg(long, value_name = "PATH", env = "ENVAULT_FILE")]
    pub file: Option<PathBuf>,
}

impl VaultArgs {
    /// The vault to read, relative to the working directory by default
    pub fn vault_path(&self, settings: &Settings) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| PathBuf::from(&settings.vault_file_name))
    }
}

/// Read the vault, ask for the password and decrypt
fn open_vault(args: &VaultArgs, settings: &Settings) -> EnvaultResult<SecureBytes> {
    let path = args.vault_path(settings);
    let data = storage::read_vault_file(&path)?;
    let password = password::read_password(args.password_stdin)?;

    tracing::debug!(path = %path.display(), "decrypting vault");
    crypto::decrypt(&data, &password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vault_path_default_and_override() {
        let settings = Settings::default();

        let args = VaultArgs::default();
        assert_eq!(args.vault_path(&settings), PathBuf::from(".env.vaulted"));

        let args = VaultArgs {
            file: Some(PathBuf::from("/tmp/other.vaulted")),
            ..VaultArgs::default()
        };
        assert_eq!(args.vault_path(&settings), PathBuf::from("/tmp/other.vaulted"));
    }
}
