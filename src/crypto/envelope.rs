//! The three-part envelope a secret is stored and transmitted in.
//!
//! Wire form:
//!
//! ```text
//! nonce_hex:authTag_hex:ciphertext_hex
//! ```
//!
//! All three fields are lowercase hex, joined by `:` in this fixed
//! order. The nonce is 12 bytes (24 hex chars), the tag 16 bytes
//! (32 hex chars), and the ciphertext exactly as long as the plaintext
//! was, including zero. A string with any other shape is rejected
//! before any cryptographic work happens.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VaultError};

/// Size of the AES-GCM nonce in bytes (96 bits).
pub const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes (128 bits).
pub const TAG_LEN: usize = 16;

/// One encrypted secret: nonce, authentication tag, and ciphertext.
///
/// Produced by [`crate::crypto::encryption::encrypt`]. Flipping any bit
/// in any field makes decryption fail closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretEnvelope {
    /// Random per-encryption nonce, never reused under the same key.
    pub nonce: [u8; NONCE_LEN],
    /// GCM authentication tag over the ciphertext.
    pub tag: [u8; TAG_LEN],
    /// Encrypted secret, same length as the plaintext.
    pub ciphertext: Vec<u8>,
}

impl SecretEnvelope {
    /// Parse the wire form.
    ///
    /// Rejects anything that is not exactly three hex fields with the
    /// right lengths: wrong field count, non-hex characters, odd-length
    /// fields, or a nonce or tag of the wrong size.
    pub fn from_string(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 3 {
            return Err(VaultError::MalformedEnvelope(format!(
                "expected 3 fields (nonce:tag:ciphertext), got {}",
                parts.len()
            )));
        }

        let nonce_bytes = hex::decode(parts[0])
            .map_err(|e| VaultError::MalformedEnvelope(format!("nonce is not valid hex: {e}")))?;
        let tag_bytes = hex::decode(parts[1])
            .map_err(|e| VaultError::MalformedEnvelope(format!("tag is not valid hex: {e}")))?;
        let ciphertext = hex::decode(parts[2]).map_err(|e| {
            VaultError::MalformedEnvelope(format!("ciphertext is not valid hex: {e}"))
        })?;

        if nonce_bytes.len() != NONCE_LEN {
            return Err(VaultError::MalformedEnvelope(format!(
                "nonce must be {NONCE_LEN} bytes, got {}",
                nonce_bytes.len()
            )));
        }
        if tag_bytes.len() != TAG_LEN {
            return Err(VaultError::MalformedEnvelope(format!(
                "tag must be {TAG_LEN} bytes, got {}",
                tag_bytes.len()
            )));
        }

        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&nonce_bytes);
        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&tag_bytes);

        Ok(Self {
            nonce,
            tag,
            ciphertext,
        })
    }
}

impl fmt::Display for SecretEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            hex::encode(self.nonce),
            hex::encode(self.tag),
            hex::encode(&self.ciphertext)
        )
    }
}

impl FromStr for SecretEnvelope {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_string(s)
    }
}

impl Serialize for SecretEnvelope {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SecretEnvelope {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_string(&s).map_err(serde::de::Error::custom)
    }
}
