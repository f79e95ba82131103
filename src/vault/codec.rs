//! Request-scoped orchestration: derive the vault key once, then run
//! the cipher across a batch of secrets.
//!
//! Nothing here holds state between calls. Every function takes the
//! master password and salt, derives a fresh key, uses it, and lets it
//! drop (zeroized) before returning. There is no session-lifetime key
//! material anywhere in this crate; re-deriving per request is the
//! accepted cost of that.

use tracing::{debug, warn};
use zeroize::Zeroize;

use crate::crypto::encryption::{decrypt, encrypt};
use crate::crypto::envelope::SecretEnvelope;
use crate::crypto::kdf::{derive_vault_key, VaultKey};
use crate::crypto::salt::Salt;
use crate::errors::{Result, VaultError};

/// Derive the vault key and encrypt a single secret.
pub fn encrypt_one(master_password: &str, salt: &Salt, plaintext: &str) -> Result<SecretEnvelope> {
    let key = derive_vault_key(master_password, salt)?;
    encrypt(&key, plaintext.as_bytes())
}

/// Derive the vault key once and encrypt a batch of secrets.
///
/// Envelopes come back in input order, each under its own fresh nonce.
/// Unlike decryption, any failure here aborts the whole batch: callers
/// must never store a partial write.
pub fn encrypt_all(
    master_password: &str,
    salt: &Salt,
    plaintexts: &[String],
) -> Result<Vec<SecretEnvelope>> {
    let key = derive_vault_key(master_password, salt)?;

    let mut envelopes = Vec::with_capacity(plaintexts.len());
    for plaintext in plaintexts {
        envelopes.push(encrypt(&key, plaintext.as_bytes())?);
    }

    debug!(count = envelopes.len(), "encrypted secret batch");
    Ok(envelopes)
}

/// Derive the vault key once and decrypt a batch of stored envelopes.
///
/// Each stored string is handled independently: a malformed or
/// unauthentic item occupies its slot as an `Err` while the rest still
/// decrypt, so one corrupted row cannot take the whole vault listing
/// down. Slots are in input order. The outer `Err` is reserved for
/// key-derivation failure, where no item could possibly succeed.
pub fn unlock_and_decrypt_all(
    master_password: &str,
    salt: &Salt,
    envelopes: &[String],
) -> Result<Vec<Result<String>>> {
    let key = derive_vault_key(master_password, salt)?;

    let mut results = Vec::with_capacity(envelopes.len());
    let mut failures = 0usize;

    for (index, stored) in envelopes.iter().enumerate() {
        let outcome = decrypt_item(&key, stored);
        if outcome.is_err() {
            failures += 1;
            warn!(index, "failed to decrypt stored envelope");
        }
        results.push(outcome);
    }

    debug!(total = envelopes.len(), failures, "decrypted secret batch");
    Ok(results)
}

/// Parse, decrypt, and UTF-8-decode one stored envelope.
fn decrypt_item(key: &VaultKey, stored: &str) -> Result<String> {
    let envelope = SecretEnvelope::from_string(stored)?;
    let plaintext = decrypt(key, &envelope)?;

    // Secrets are strings. Bytes that authenticated but do not decode
    // are treated like any other corrupted item: fail closed, and wipe
    // the scratch buffer on the way out.
    String::from_utf8(plaintext).map_err(|e| {
        let mut bytes = e.into_bytes();
        bytes.zeroize();
        VaultError::AuthenticationFailure
    })
}
