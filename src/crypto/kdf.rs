//! Vault-key derivation using Argon2id.
//!
//! Argon2id is a memory-hard KDF that protects against brute-force and
//! GPU-based attacks. The vault key is derived fresh from the master
//! password and stored salt on every request and is never persisted:
//! determinism of this derivation is what makes the vault openable at
//! all.

use argon2::{Algorithm, Argon2, Params, Version};
use zeroize::Zeroize;

use crate::crypto::salt::Salt;
use crate::errors::{Result, VaultError};

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Configurable Argon2id parameters.
#[derive(Debug, Clone, Copy)]
pub struct KdfParams {
    /// Memory cost in KiB (default: 65 536 = 64 MB).
    pub memory_kib: u32,
    /// Number of iterations (default: 3).
    pub iterations: u32,
    /// Parallelism lanes (default: 4).
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

/// Minimum safe memory cost in KiB (8 MB).
const MIN_MEMORY_KIB: u32 = 8_192;

/// A derived vault key that zeroes its memory when dropped.
///
/// Lives for a single encrypt or decrypt batch. Never cached, logged,
/// or serialized; `Debug` is redacted so it cannot leak through error
/// formatting either.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct VaultKey {
    bytes: [u8; KEY_LEN],
}

impl VaultKey {
    /// Wrap raw key bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Raw key bytes, for building a cipher.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for VaultKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultKey").field("bytes", &"[REDACTED]").finish()
    }
}

/// Derive the 32-byte vault key from the master password and salt.
///
/// Uses the default Argon2id parameters (64 MB, 3 iterations, 4 lanes).
pub fn derive_vault_key(master_password: &str, salt: &Salt) -> Result<VaultKey> {
    derive_vault_key_with_params(master_password, salt, &KdfParams::default())
}

/// Derive the vault key with explicit Argon2id parameters.
///
/// The same password + salt + params will always produce the same key.
/// Enforces minimum Argon2 parameters to prevent dangerously weak KDF
/// settings.
pub fn derive_vault_key_with_params(
    master_password: &str,
    salt: &Salt,
    kdf_params: &KdfParams,
) -> Result<VaultKey> {
    if kdf_params.memory_kib < MIN_MEMORY_KIB {
        return Err(VaultError::InternalCrypto(format!(
            "Argon2 memory_kib must be at least {MIN_MEMORY_KIB} (got {})",
            kdf_params.memory_kib
        )));
    }
    if kdf_params.iterations < 1 {
        return Err(VaultError::InternalCrypto(
            "Argon2 iterations must be at least 1".into(),
        ));
    }
    if kdf_params.parallelism < 1 {
        return Err(VaultError::InternalCrypto(
            "Argon2 parallelism must be at least 1".into(),
        ));
    }

    let params = Params::new(
        kdf_params.memory_kib,
        kdf_params.iterations,
        kdf_params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| VaultError::InternalCrypto(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = [0u8; KEY_LEN];
    argon2
        .hash_password_into(master_password.as_bytes(), salt.as_bytes(), &mut key)
        .map_err(|e| VaultError::InternalCrypto(format!("Argon2id hashing failed: {e}")))?;

    let vault_key = VaultKey::new(key);
    key.zeroize();
    Ok(vault_key)
}
