//! Custom error types for envault
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for envault operations
#[derive(Error, Debug)]
pub enum EnvaultError {
    /// The buffer is not an envault envelope (too short or wrong magic)
    #[error("Invalid file format: not an envault vault or the file is truncated")]
    InvalidFormat,

    /// AEAD authentication failed.
    ///
    /// Wrong password, corrupted ciphertext and tampering all map here so the
    /// caller cannot tell them apart.
    #[error("Decryption failed: the password may be wrong or the file is damaged")]
    DecryptionFailed,

    /// Argon2 rejected its parameters or input
    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    /// AES-GCM could not be initialised with the derived key
    #[error("Cipher initialisation error: {0}")]
    CipherInit(String),

    /// Sealing the plaintext failed
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// The decrypted content is not a valid .env file
    #[error("Parse error: {0}")]
    Parse(String),

    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Input file exists but has no content
    #[error("File is empty: {0}")]
    EmptyFile(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal UI errors
    #[error("TUI error: {0}")]
    Tui(String),

    /// The user aborted an interactive prompt
    #[error("Operation cancelled: {0}")]
    Cancelled(String),
}

impl EnvaultError {
    /// Check if this error comes from reading a vault that is not ours
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, Self::InvalidFormat)
    }

    /// Check if this is an authentication failure
    pub fn is_decryption_failed(&self) -> bool {
        matches!(self, Self::DecryptionFailed)
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for EnvaultError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for EnvaultError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for envault operations
pub type EnvaultResult<T> = Result<T, EnvaultError>;
