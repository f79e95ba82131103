//! Per-user salt generation and boundary parsing.
//!
//! A salt is 16 random bytes, generated once when an account is created
//! and stored next to the user record as a 32-character lowercase hex
//! string. The same salt feeds both the login-password hash and the
//! vault-key derivation; the two algorithms are independent, so neither
//! output reveals anything about the other.

use std::fmt;
use std::str::FromStr;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, VaultError};

/// Length of a salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// A per-user salt, fixed for the lifetime of the account.
///
/// Both the stored password digest and every stored envelope depend on
/// this value; regenerating it would lock the user out of all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Salt([u8; SALT_LEN]);

impl Salt {
    /// Generate a fresh random salt from the OS CSPRNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; SALT_LEN];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Wrap raw salt bytes.
    pub fn from_bytes(bytes: [u8; SALT_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse the storage form: exactly 32 hex characters.
    ///
    /// Anything else is rejected here, before it can reach a key
    /// derivation. A salt that fails to parse is a problem with the
    /// stored user record, not an input worth retrying.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s)
            .map_err(|e| VaultError::InvalidSalt(format!("not valid hex: {e}")))?;
        if bytes.len() != SALT_LEN {
            return Err(VaultError::InvalidSalt(format!(
                "expected {SALT_LEN} bytes, got {}",
                bytes.len()
            )));
        }

        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(&bytes);
        Ok(Self(salt))
    }

    /// The storage form: 32 lowercase hex characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Raw salt bytes.
    pub fn as_bytes(&self) -> &[u8; SALT_LEN] {
        &self.0
    }
}

impl fmt::Display for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Salt {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for Salt {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Salt {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
