//! Key derivation using Argon2id
//!
//! Derives the envelope key from the user's password using Argon2id,
//! a memory-hard key derivation function resistant to GPU/ASIC attacks.
//!
//! The cost parameters are part of the vault format. Changing any of them
//! requires a new magic tag, otherwise existing vaults stop opening.

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use argon2::{Algorithm, Argon2, Params, Version};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{EnvaultError, EnvaultResult};

/// Length of the per-vault salt in bytes
pub const SALT_LEN: usize = 16;

/// Length of the derived key (AES-256)
pub const KEY_LEN: usize = 32;

/// Argon2 time cost (iterations)
pub const ARGON2_TIME_COST: u32 = 1;

/// Argon2 memory cost in KiB (64 MiB)
pub const ARGON2_MEMORY_KIB: u32 = 64 * 1024;

/// Argon2 parallelism (lanes)
pub const ARGON2_PARALLELISM: u32 = 4;

/// A derived encryption key
///
/// Lives only for the duration of one seal/open call and is wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Generate a fresh random salt from the OS RNG
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Derive the envelope key from a password and salt
pub fn derive_key(password: &str, salt: &[u8]) -> EnvaultResult<DerivedKey> {
    let params = Params::new(
        ARGON2_MEMORY_KIB,
        ARGON2_TIME_COST,
        ARGON2_PARALLELISM,
        Some(KEY_LEN),
    )
    .map_err(|e| EnvaultError::KeyDerivation(format!("Invalid Argon2 parameters: {}", e)))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = DerivedKey { key: [0u8; KEY_LEN] };
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut key.key)
        .map_err(|e| EnvaultError::KeyDerivation(format!("Key derivation failed: {}", e)))?;

    Ok(key)
}
