//! `envault config`: show where settings live and what they are

use clap::Args;

use crate::config::{EnvaultPaths, Settings};
use crate::error::EnvaultResult;

#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Write the current settings to the settings file
    #[arg(long)]
    pub save: bool,
}

pub fn handle_config_command(
    args: &ConfigArgs,
    paths: &EnvaultPaths,
    settings: &Settings,
) -> EnvaultResult<()> {
    if args.save {
        settings.save(paths)?;
        println!("Saved settings to {}", paths.settings_file().display());
        println!();
    }

    println!("envault configuration");
    println!("=====================");
    println!("Config directory: {}", paths.base_dir().display());
    println!(
        "Settings file:    {}{}",
        paths.settings_file().display(),
        if paths.settings_file().exists() {
            ""
        } else {
            " (not created, using defaults)"
        }
    );
    println!();
    println!("Settings:");
    println!("  Vault file name: {}", settings.vault_file_name);
    println!("  Shell:           {}", settings.shell);
    println!("  Theme:           {:?}", settings.theme);
    println!("  Full help:       {}", settings.show_full_help);
    match &settings.script_dir {
        Some(dir) => println!("  Script dir:      {}", dir.display()),
        None => println!(
            "  Script dir:      {} (system temp)",
            std::env::temp_dir().display()
        ),
    }

    Ok(())
}
