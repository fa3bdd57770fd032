//! `envault dump`: print the decrypted vault

use std::io::Write;

use super::{open_vault, VaultArgs};
use crate::config::Settings;
use crate::error::{EnvaultError, EnvaultResult};

/// Decrypt the vault and write the plaintext to stdout unchanged
pub fn handle_dump_command(args: &VaultArgs, settings: &Settings) -> EnvaultResult<()> {
    let plaintext = open_vault(args, settings)?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(plaintext.as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(|e| EnvaultError::Io(format!("Failed to write to stdout: {}", e)))
}
