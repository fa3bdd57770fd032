use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

use envault::cli::{
    handle_config_command, handle_dump_command, handle_encrypt_command, handle_export_command,
    handle_unset_command, ConfigArgs, EncryptArgs, EncryptOptions, ExportArgs, UnsetArgs,
    VaultArgs,
};
use envault::config::{EnvaultPaths, Settings};

const EXAMPLES: &str = "\
Examples:
  envault .env                            Encrypt .env into .env.vaulted
  eval \"$(envault export --output-script-only)\"
                                          Load the variables into this shell
  envault export -- npm start             Run a command with the variables set
  envault export --select --new-shell     Pick variables, then start a shell
  eval \"$(envault unset --output-script-only)\"
                                          Remove them again
  echo \"$PASSWORD\" | envault dump --password-stdin > decrypted.env";

#[derive(Parser)]
#[command(
    name = "envault",
    version,
    about = "Encrypt .env files with a password and load them into your shell",
    long_about = "envault seals a .env file into a password-protected vault \
                  (Argon2id + AES-256-GCM) and later exports its variables into \
                  a shell, a new shell session or a single command.",
    args_conflicts_with_subcommands = true,
    after_help = EXAMPLES
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// The .env file to encrypt
    env_file: Option<PathBuf>,

    #[command(flatten)]
    encrypt: EncryptOptions,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a .env file into a vault
    Encrypt(EncryptArgs),

    /// Export the vault's variables
    Export(ExportArgs),

    /// Unset the vault's variables
    Unset(UnsetArgs),

    /// Print the decrypted vault
    Dump(VaultArgs),

    /// Show current configuration and paths
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    envault::logging::init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = EnvaultPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Encrypt(args)) => {
            handle_encrypt_command(&args.env_file, &args.options, &settings)?;
        }
        Some(Commands::Export(args)) => {
            let code = handle_export_command(&args, &settings)?;
            if code != 0 {
                std::process::exit(code);
            }
        }
        Some(Commands::Unset(args)) => {
            handle_unset_command(&args, &settings)?;
        }
        Some(Commands::Dump(args)) => {
            handle_dump_command(&args, &settings)?;
        }
        Some(Commands::Config(args)) => {
            handle_config_command(&args, &paths, &settings)?;
        }
        None => match cli.env_file {
            Some(env_file) => handle_encrypt_command(&env_file, &cli.encrypt, &settings)?,
            None => Cli::command().print_help()?,
        },
    }

    Ok(())
}
