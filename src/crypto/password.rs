//! Login-password hashing with PBKDF2-HMAC-SHA512.
//!
//! The digest stored in the user record only ever gets recomputed and
//! compared; it is never reversed and never reused as key material. It
//! shares the per-user salt with the vault-key derivation but nothing
//! else, so verifying a login reveals nothing about the vault key.

use std::fmt;

use pbkdf2::pbkdf2_hmac;
use serde::{Deserialize, Serialize};
use sha2::Sha512;
use subtle::ConstantTimeEq;

use crate::crypto::salt::Salt;
use crate::errors::{Result, VaultError};

/// Length of a password digest in bytes (512 bits).
pub const DIGEST_LEN: usize = 64;

/// PBKDF2 iteration count for login-password hashing.
///
/// The work factor is the only cost an offline attacker pays per guess
/// against a stolen digest. Changing it invalidates every stored digest.
pub const PBKDF2_ITERATIONS: u32 = 200_000;

/// A login-password digest as stored in the user record.
///
/// Stored as 128 lowercase hex characters. Equality comparison is
/// constant-time over all 64 bytes.
#[derive(Clone, Copy)]
pub struct PasswordDigest([u8; DIGEST_LEN]);

impl PasswordDigest {
    /// Wrap raw digest bytes.
    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse the storage form: exactly 128 hex characters.
    ///
    /// A digest that fails to parse means the stored record is corrupted,
    /// which no retry of the login can fix.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s)
            .map_err(|e| VaultError::InternalCrypto(format!("digest is not valid hex: {e}")))?;
        if bytes.len() != DIGEST_LEN {
            return Err(VaultError::InternalCrypto(format!(
                "digest must be {DIGEST_LEN} bytes, got {}",
                bytes.len()
            )));
        }

        let mut digest = [0u8; DIGEST_LEN];
        digest.copy_from_slice(&bytes);
        Ok(Self(digest))
    }

    /// The storage form: 128 lowercase hex characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }
}

impl PartialEq for PasswordDigest {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl Eq for PasswordDigest {}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PasswordDigest").field(&self.to_hex()).finish()
    }
}

impl fmt::Display for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for PasswordDigest {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PasswordDigest {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Hash a login password with the user's salt at the standard cost.
///
/// Deterministic: the same password and salt always produce the same
/// 64-byte digest.
pub fn hash_password(password: &str, salt: &Salt) -> PasswordDigest {
    pbkdf2_digest(password, salt, PBKDF2_ITERATIONS)
}

/// Hash a login password with an explicit iteration count.
///
/// Rejects a zero count rather than producing an unstretched digest.
pub fn hash_password_with_iterations(
    password: &str,
    salt: &Salt,
    iterations: u32,
) -> Result<PasswordDigest> {
    if iterations == 0 {
        return Err(VaultError::InternalCrypto(
            "PBKDF2 iteration count must be non-zero".to_string(),
        ));
    }
    Ok(pbkdf2_digest(password, salt, iterations))
}

/// Check a login password against the stored digest at the standard cost.
///
/// Recomputes the digest and compares all 64 bytes in constant time, so
/// a mismatch costs the same no matter which byte differs.
pub fn verify_password(password: &str, salt: &Salt, stored: &PasswordDigest) -> bool {
    let computed = hash_password(password, salt);
    computed.0.ct_eq(&stored.0).into()
}

/// Check a login password against a digest made with an explicit
/// iteration count.
pub fn verify_password_with_iterations(
    password: &str,
    salt: &Salt,
    stored: &PasswordDigest,
    iterations: u32,
) -> Result<bool> {
    let computed = hash_password_with_iterations(password, salt, iterations)?;
    Ok(computed.0.ct_eq(&stored.0).into())
}

fn pbkdf2_digest(password: &str, salt: &Salt, iterations: u32) -> PasswordDigest {
    let mut digest = [0u8; DIGEST_LEN];
    pbkdf2_hmac::<Sha512>(password.as_bytes(), salt.as_bytes(), iterations, &mut digest);
    PasswordDigest(digest)
}
