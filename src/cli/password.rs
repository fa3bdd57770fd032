//! Password input
//!
//! Interactive prompts go through rpassword (no echo). With
//! `--password-stdin` the first line of stdin is used instead.

use std::io::BufRead;

use crate::crypto::SecureString;
use crate::error::{EnvaultError, EnvaultResult};

/// Prompt for a password (hidden input)
pub fn prompt_password(prompt: &str) -> EnvaultResult<SecureString> {
    let password = rpassword::prompt_password(prompt)
        .map_err(|e| EnvaultError::Io(format!("Failed to read password: {}", e)))?;
    Ok(SecureString::new(password.trim()))
}

/// Read the password from the first line of a reader
pub fn read_password_line<R: BufRead>(mut reader: R) -> EnvaultResult<SecureString> {
    let mut buf = String::new();
    reader
        .read_line(&mut buf)
        .map_err(|e| EnvaultError::Io(format!("Failed to read password from stdin: {}", e)))?;

    let line = SecureString::new(buf.trim());
    zeroize::Zeroize::zeroize(&mut buf);

    if line.is_empty() {
        return Err(EnvaultError::Config(
            "No password given on stdin".to_string(),
        ));
    }

    Ok(line)
}

/// Get the password for an existing vault
pub fn read_password(from_stdin: bool) -> EnvaultResult<SecureString> {
    if from_stdin {
        read_password_line(std::io::stdin().lock())
    } else {
        prompt_password("Password: ")
    }
}

/// Get the password for a new vault, asking twice when interactive
pub fn prompt_new_password(from_stdin: bool) -> EnvaultResult<SecureString> {
    if from_stdin {
        return read_password_line(std::io::stdin().lock());
    }

    let first = prompt_password("New password: ")?;
    if first.is_empty() {
        return Err(EnvaultError::Config("Password must not be empty".to_string()));
    }

    let second = prompt_password("Confirm password: ")?;
    if first != second {
        return Err(EnvaultError::Config("Passwords do not match".to_string()));
    }

    Ok(first)
}
