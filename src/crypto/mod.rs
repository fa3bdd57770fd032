//! Cryptographic functions for envault
//!
//! Provides the vault envelope: AES-256-GCM encryption with Argon2id key
//! derivation, plus zero-on-drop wrappers for passwords and plaintext.

pub mod envelope;
pub mod key_derivation;
pub mod secure_memory;

pub use envelope::{decrypt, encrypt, is_envelope, Envelope, MAGIC};
pub use key_derivation::{derive_key, DerivedKey};
pub use secure_memory::{SecureBytes, SecureString};
