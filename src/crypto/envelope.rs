//! Vault envelope: AES-256-GCM over an Argon2id-derived key
//!
//! On-disk layout, all fields raw bytes:
//!
//! ```text
//! [8 bytes magic "ENVAULT1"][16 bytes salt][12 bytes nonce][N bytes ciphertext+tag]
//! ```
//!
//! There is no length field for the ciphertext; it runs to the end of the
//! buffer. Every call to [`encrypt`] draws a new salt and nonce, so the key
//! is different for every vault and nonce reuse under one key cannot happen.

use aes_gcm::{
    aead::{rand_core::RngCore, Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};

use crate::error::{EnvaultError, EnvaultResult};

use super::key_derivation::{derive_key, generate_salt, SALT_LEN};
use super::secure_memory::SecureBytes;

/// Format tag and version
pub const MAGIC: &[u8; 8] = b"ENVAULT1";

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_LEN: usize = 12;

/// Size of the AES-GCM authentication tag in bytes
pub const TAG_LEN: usize = 16;

/// Smallest buffer that can be parsed as an envelope
pub const HEADER_LEN: usize = MAGIC.len() + SALT_LEN + NONCE_LEN;

/// A borrowed, parsed view of an envelope
#[derive(Debug, Clone, Copy)]
pub struct Envelope<'a> {
    salt: &'a [u8],
    nonce: &'a [u8],
    ciphertext: &'a [u8],
}

impl<'a> Envelope<'a> {
    /// Split a buffer into its fixed-offset fields
    ///
    /// Fails with [`EnvaultError::InvalidFormat`] when the buffer is shorter
    /// than the header or does not start with [`MAGIC`].
    pub fn parse(data: &'a [u8]) -> EnvaultResult<Self> {
        if data.len() < HEADER_LEN || &data[..MAGIC.len()] != MAGIC {
            return Err(EnvaultError::InvalidFormat);
        }

        let (salt, rest) = data[MAGIC.len()..].split_at(SALT_LEN);
        let (nonce, ciphertext) = rest.split_at(NONCE_LEN);

        Ok(Self {
            salt,
            nonce,
            ciphertext,
        })
    }

    pub fn salt(&self) -> &'a [u8] {
        self.salt
    }

    pub fn nonce(&self) -> &'a [u8] {
        self.nonce
    }

    /// Ciphertext including the trailing authentication tag
    pub fn ciphertext(&self) -> &'a [u8] {
        self.ciphertext
    }
}

/// Check whether a buffer looks like an envelope (magic and minimum length)
pub fn is_envelope(data: &[u8]) -> bool {
    Envelope::parse(data).is_ok()
}

/// Encrypt plaintext under a password
///
/// Returns `magic || salt || nonce || ciphertext`.
pub fn encrypt(plaintext: &[u8], password: &str) -> EnvaultResult<Vec<u8>> {
    let salt = generate_salt();
    let key = derive_key(password, &salt)?;

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| EnvaultError::CipherInit(format!("Failed to create cipher: {}", e)))?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| EnvaultError::Encryption(format!("Encryption failed: {}", e)))?;

    let mut out = Vec::with_capacity(HEADER_LEN + ciphertext.len());
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&salt);
    out.extend_from_slice(&nonce_bytes);
    out.extend_from_slice(&ciphertext);

    tracing::debug!(
        plaintext_len = plaintext.len(),
        envelope_len = out.len(),
        "sealed envelope"
    );

    Ok(out)
}

/// Decrypt an envelope with a password
///
/// Any authentication failure is reported as [`EnvaultError::DecryptionFailed`]
/// regardless of whether the password or the data was wrong.
pub fn decrypt(data: &[u8], password: &str) -> EnvaultResult<SecureBytes> {
    let envelope = Envelope::parse(data)?;

    let key = derive_key(password, envelope.salt())?;

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| EnvaultError::CipherInit(format!("Failed to create cipher: {}", e)))?;

    let nonce = Nonce::from_slice(envelope.nonce());

    let plaintext = cipher
        .decrypt(nonce, envelope.ciphertext())
        .map_err(|_| EnvaultError::DecryptionFailed)?;

    Ok(SecureBytes::new(plaintext))
}
