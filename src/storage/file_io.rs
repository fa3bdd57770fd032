//! File I/O for vaults, .env files and generated scripts
//!
//! Vault writes are atomic: the bytes go to a temp file in the same
//! directory, are synced, then renamed over the target.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::{EnvaultError, EnvaultResult};

/// Read a whole file, rejecting missing and empty files
fn read_non_empty(path: &Path) -> EnvaultResult<Vec<u8>> {
    if !path.exists() {
        return Err(EnvaultError::FileNotFound(path.display().to_string()));
    }

    let bytes = fs::read(path)
        .map_err(|e| EnvaultError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    if bytes.is_empty() {
        return Err(EnvaultError::EmptyFile(path.display().to_string()));
    }

    tracing::debug!(path = %path.display(), len = bytes.len(), "read file");
    Ok(bytes)
}

/// Read a plaintext .env file
pub fn read_env_file<P: AsRef<Path>>(path: P) -> EnvaultResult<Vec<u8>> {
    read_non_empty(path.as_ref())
}

/// Read an encrypted vault file
pub fn read_vault_file<P: AsRef<Path>>(path: P) -> EnvaultResult<Vec<u8>> {
    read_non_empty(path.as_ref())
}

/// Write a vault file atomically (write to temp, then rename)
///
/// The file is readable and writable by the owner only.
pub fn write_vault_file<P: AsRef<Path>>(path: P, data: &[u8]) -> EnvaultResult<()> {
    let path = path.as_ref();

    // Ensure parent directory exists
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            EnvaultError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = temp_path_for(path);

    let file = create_private(&temp_path)
        .map_err(|e| EnvaultError::Io(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    let written = writer
        .write_all(data)
        .and_then(|_| writer.flush())
        .and_then(|_| writer.get_ref().sync_all());

    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(EnvaultError::Io(format!("Failed to write vault: {}", e)));
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        EnvaultError::Io(format!("Failed to rename temp file: {}", e))
    })?;

    tracing::debug!(path = %path.display(), len = data.len(), "wrote vault");
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "vault".into());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(unix)]
fn create_private(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn create_private(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

/// Where the vault for a given .env file lives
pub fn default_vault_path<P: AsRef<Path>>(env_path: P, settings: &Settings) -> PathBuf {
    let dir = env_path.as_ref().parent().unwrap_or_else(|| Path::new(""));
    dir.join(&settings.vault_file_name)
}

/// Persist a generated script as `envault-XXXX.sh` and return its path
///
/// The file outlives the process so the caller can `source` it. Its last
/// line deletes it, so the secrets inside are gone once it has been sourced.
pub fn write_script_file<P: AsRef<Path>>(script: &str, dir: P) -> EnvaultResult<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| {
        EnvaultError::Io(format!("Failed to create directory {}: {}", dir.display(), e))
    })?;

    let mut file = tempfile::Builder::new()
        .prefix("envault-")
        .suffix(".sh")
        .tempfile_in(dir)
        .map_err(|e| EnvaultError::Io(format!("Failed to create script file: {}", e)))?;

    let cleanup = format!("rm -f -- {}\n", single_quote(&file.path().to_string_lossy()));
    file.write_all(script.as_bytes())
        .and_then(|_| {
            if script.is_empty() || script.ends_with('\n') {
                Ok(())
            } else {
                file.write_all(b"\n")
            }
        })
        .and_then(|_| file.write_all(cleanup.as_bytes()))
        .and_then(|_| file.flush())
        .map_err(|e| EnvaultError::Io(format!("Failed to write script file: {}", e)))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(file.path(), fs::Permissions::from_mode(0o700))
            .map_err(|e| EnvaultError::Io(format!("Failed to set script permissions: {}", e)))?;
    }

    let (_, path) = file
        .keep()
        .map_err(|e| EnvaultError::Io(format!("Failed to keep script file: {}", e)))?;

    tracing::debug!(path = %path.display(), "wrote script");
    Ok(path)
}

/// Quote a word for POSIX shells: `'...'` with `'` written as `'\''`
fn single_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}
