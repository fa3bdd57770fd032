//! envault - password-protected .env files
//!
//! A plaintext `.env` file is sealed into a vault (`.env.vaulted`) with a
//! key derived from a password. Later the vault is opened again and its
//! variables are handed to a shell: as an export script, as an unset
//! script, or by running a command with them set. An optional checklist
//! lets the user pick which variables to apply.
//!
//! # Architecture
//!
//! - `crypto`: vault envelope format, key derivation, zeroizing buffers
//! - `env`: .env parsing, shell script generation, environment overlay
//! - `tui`: the variable selector (state machine, rendering, front ends)
//! - `storage`: vault, .env and script files
//! - `config`: configuration paths and settings
//! - `cli`: command handlers used by the binary
//! - `logging`: tracing subscriber setup
//! - `error`: custom error types
//!
//! # Example
//!
//! ```rust
//! use envault::crypto::{decrypt, encrypt};
//! use envault::env::{export_script, parse};
//!
//! let vault = encrypt(b"GREETING=hello world\n", "p@ss").unwrap();
//! let plaintext = decrypt(&vault, "p@ss").unwrap();
//! let vars = parse(plaintext.as_bytes()).unwrap();
//! assert_eq!(export_script(&vars), "#!/bin/bash\n\nexport GREETING=\"hello world\"\n");
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod env;
pub mod error;
pub mod logging;
pub mod storage;
pub mod tui;

pub use error::{EnvaultError, EnvaultResult};
