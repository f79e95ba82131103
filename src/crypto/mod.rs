//! Cryptographic primitives for the credential vault.
//!
//! This module provides:
//! - Per-user salt generation and boundary parsing (`salt`)
//! - PBKDF2-HMAC-SHA512 login-password hashing (`password`)
//! - Argon2id vault-key derivation (`kdf`)
//! - The `nonce:tag:ciphertext` envelope wire format (`envelope`)
//! - AES-256-GCM encryption and decryption over envelopes (`encryption`)

pub mod encryption;
pub mod envelope;
pub mod kdf;
pub mod password;
pub mod salt;

// Re-export the most commonly used items so callers can write:
//   use credvault::crypto::{encrypt, decrypt, derive_vault_key, ...};
pub use encryption::{decrypt, encrypt};
pub use envelope::SecretEnvelope;
pub use kdf::{derive_vault_key, derive_vault_key_with_params, KdfParams, VaultKey};
pub use password::{hash_password, verify_password, PasswordDigest};
pub use salt::Salt;
