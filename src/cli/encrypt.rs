//! `envault <ENV_FILE>` / `envault encrypt <ENV_FILE>`
//!
//! Seals a plaintext .env file into a vault next to it.

use std::io::{BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use clap::Args;

use super::{password, VaultArgs};
use crate::config::Settings;
use crate::crypto;
use crate::env;
use crate::error::{EnvaultError, EnvaultResult};
use crate::storage;

/// Options for encrypting, shared by the top-level form and the subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct EncryptOptions {
    #[command(flatten)]
    pub vault: VaultArgs,

    /// Overwrite an existing vault without asking
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug, Clone)]
pub struct EncryptArgs {
    /// The .env file to encrypt
    pub env_file: PathBuf,

    #[command(flatten)]
    pub options: EncryptOptions,
}

/// Handle the encrypt command
pub fn handle_encrypt_command(
    env_file: &Path,
    options: &EncryptOptions,
    settings: &Settings,
) -> EnvaultResult<()> {
    let output = options
        .vault
        .file
        .clone()
        .unwrap_or_else(|| storage::default_vault_path(env_file, settings));

    if output.exists() && !options.force {
        confirm_overwrite(&output, options.vault.password_stdin)?;
    }

    let password = password::prompt_new_password(options.vault.password_stdin)?;
    let count = encrypt_file(env_file, &output, &password)?;

    println!("Created encrypted file: {}", output.display());
    eprintln!("{} variables sealed", count);
    Ok(())
}

/// Read, validate, encrypt and write; returns the number of variables
pub fn encrypt_file(env_file: &Path, output: &Path, password: &str) -> EnvaultResult<usize> {
    let data = storage::read_env_file(env_file)?;

    if crypto::is_envelope(&data) {
        return Err(EnvaultError::Config(format!(
            "{} is already an envault vault",
            env_file.display()
        )));
    }

    // Refuse to seal something that could not be loaded back
    let count = env::parse(&data)?.len();

    let sealed = crypto::encrypt(&data, password)?;
    storage::write_vault_file(output, &sealed)?;

    tracing::info!(
        input = %env_file.display(),
        output = %output.display(),
        count,
        "encrypted env file"
    );
    Ok(count)
}

/// Ask before replacing an existing vault
///
/// Without a terminal to ask on, the answer is no.
fn confirm_overwrite(path: &Path, password_stdin: bool) -> EnvaultResult<()> {
    let refused = || {
        EnvaultError::Cancelled(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ))
    };

    if password_stdin || !std::io::stdin().is_terminal() {
        return Err(refused());
    }

    eprint!("{} already exists. Overwrite? [y/N] ", path.display());
    let _ = std::io::stderr().flush();

    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(|e| EnvaultError::Io(format!("Failed to read answer: {}", e)))?;

    if is_yes(&answer) {
        Ok(())
    } else {
        Err(refused())
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
