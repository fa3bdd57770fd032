//! `envault export` and `envault unset`
//!
//! Both decrypt the vault, optionally let the user pick entries, and then
//! hand the result to the shell in one of several ways.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use clap::Args;

use super::{open_vault, VaultArgs};
use crate::config::Settings;
use crate::env::{self, EnvOverlay, EnvVar};
use crate::error::{EnvaultError, EnvaultResult};
use crate::storage;
use crate::tui::{self, ProviderKind};

#[derive(Args, Debug, Clone, Default)]
pub struct ExportArgs {
    #[command(flatten)]
    pub vault: VaultArgs,

    /// Pick the variables to apply from a checklist
    #[arg(long)]
    pub select: bool,

    /// Print only the script (for eval or source)
    #[arg(long)]
    pub output_script_only: bool,

    /// Start a new shell with the variables set
    #[arg(long, conflicts_with_all = ["output_script_only", "command"])]
    pub new_shell: bool,

    /// Run a command with the variables set
    #[arg(last = true, value_name = "CMD")]
    pub command: Vec<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct UnsetArgs {
    #[command(flatten)]
    pub vault: VaultArgs,

    /// Pick the variables to unset from a checklist
    #[arg(long)]
    pub select: bool,

    /// Print only the script (for eval or source)
    #[arg(long)]
    pub output_script_only: bool,
}

/// Handle the export command, returning the exit code to use
pub fn handle_export_command(args: &ExportArgs, settings: &Settings) -> EnvaultResult<i32> {
    let entries = load_entries(&args.vault, args.select, settings)?;
    let count = env::count_enabled(&entries);

    tracing::debug!(
        select = args.select,
        new_shell = args.new_shell,
        command = !args.command.is_empty(),
        count,
        "export"
    );

    if args.new_shell {
        eprintln!(
            "Starting {} with {} environment variables set",
            settings.shell, count
        );
        return run_with_env(&settings.shell, &[], &entries);
    }

    if let Some((program, rest)) = args.command.split_first() {
        eprintln!(
            "Running `{}` with {} environment variables set",
            args.command.join(" "),
            count
        );
        return run_with_env(program, rest, &entries);
    }

    let script = env::export_script(&entries);
    emit_script(&script, args.output_script_only, settings)?;
    if !args.output_script_only {
        eprintln!("Exported {} environment variables", count);
    }
    Ok(0)
}

/// Handle the unset command
pub fn handle_unset_command(args: &UnsetArgs, settings: &Settings) -> EnvaultResult<()> {
    let entries = load_entries(&args.vault, args.select, settings)?;
    let count = env::count_enabled(&entries);

    let script = env::unset_script(&entries);
    emit_script(&script, args.output_script_only, settings)?;
    if !args.output_script_only {
        eprintln!("Unset {} environment variables", count);
    }
    Ok(())
}

/// Decrypt, parse and, if asked, run the selector
fn load_entries(vault: &VaultArgs, select: bool, settings: &Settings) -> EnvaultResult<Vec<EnvVar>> {
    let plaintext = open_vault(vault, settings)?;
    let entries = env::parse(plaintext.as_bytes())?;
    drop(plaintext);

    if !select {
        return Ok(entries);
    }

    let mut provider = tui::new_provider(
        ProviderKind::detect(),
        settings.theme(),
        settings.show_full_help,
    );
    tui::select_env_vars(provider.as_mut(), entries)
}

/// Print the script, or save it and print a `source` line for it
fn emit_script(script: &str, script_only: bool, settings: &Settings) -> EnvaultResult<()> {
    let mut stdout = std::io::stdout().lock();

    let written = if script_only {
        stdout.write_all(script.as_bytes())
    } else {
        let dir = settings
            .script_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir);
        let path: PathBuf = storage::write_script_file(script, dir)?;
        writeln!(stdout, "source {}", path.display())
    };

    written
        .and_then(|_| stdout.flush())
        .map_err(|e| EnvaultError::Io(format!("Failed to write to stdout: {}", e)))
}

/// Run a program with the enabled entries laid over the inherited environment
///
/// Inherited variables that are not valid UTF-8 are not passed on.
pub fn run_with_env(program: &str, args: &[String], entries: &[EnvVar]) -> EnvaultResult<i32> {
    let overlay = EnvOverlay::from_entries(entries);
    let inherited = std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)));

    let status = Command::new(program)
        .args(args)
        .env_clear()
        .envs(overlay.materialize(inherited))
        .status()
        .map_err(|e| EnvaultError::Io(format!("Failed to run {}: {}", program, e)))?;

    tracing::debug!(program, status = %status, "child exited");
    Ok(exit_code(status))
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    status
        .code()
        .or_else(|| status.signal().map(|sig| 128 + sig))
        .unwrap_or(1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}
