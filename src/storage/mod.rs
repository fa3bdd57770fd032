//! Storage layer for envault
//!
//! Plain files only: the plaintext .env input, the encrypted vault, and the
//! scripts handed to the shell.

pub mod file_io;

pub use file_io::{
    default_vault_path, read_env_file, read_vault_file, write_script_file, write_vault_file,
};
