//! AES-256-GCM authenticated encryption of individual secrets.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce and
//! returns a [`SecretEnvelope`] carrying the nonce, the 16-byte auth
//! tag, and the ciphertext as separate fields.  `decrypt` verifies the
//! tag before releasing any plaintext and fails closed on a mismatch.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};

use crate::crypto::envelope::{SecretEnvelope, NONCE_LEN, TAG_LEN};
use crate::crypto::kdf::VaultKey;
use crate::errors::{Result, VaultError};

/// Encrypt `plaintext` under `key` into a self-contained envelope.
///
/// Binary-safe: any byte sequence round-trips exactly, including the
/// empty one (the envelope then carries an empty ciphertext but a fully
/// populated nonce and tag). Two calls with identical inputs produce
/// different envelopes because the nonce is fresh each time.
pub fn encrypt(key: &VaultKey, plaintext: &[u8]) -> Result<SecretEnvelope> {
    // Build the cipher from the raw key bytes.
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| VaultError::InternalCrypto(format!("invalid key length: {e}")))?;

    // Generate a random 12-byte nonce. Callers never supply one: a
    // repeated nonce under the same key would break confidentiality.
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    // Encrypt and authenticate the plaintext. The AEAD returns the
    // ciphertext with the 16-byte tag appended.
    let mut sealed = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| VaultError::InternalCrypto(format!("encryption error: {e}")))?;

    if sealed.len() < TAG_LEN {
        return Err(VaultError::InternalCrypto(
            "AEAD output shorter than the authentication tag".to_string(),
        ));
    }

    // Split the tag off so the envelope's ciphertext is exactly as long
    // as the plaintext.
    let tag_bytes = sealed.split_off(sealed.len() - TAG_LEN);
    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&tag_bytes);

    let mut nonce_arr = [0u8; NONCE_LEN];
    nonce_arr.copy_from_slice(&nonce);

    Ok(SecretEnvelope {
        nonce: nonce_arr,
        tag,
        ciphertext: sealed,
    })
}

/// Decrypt an envelope that was produced by `encrypt`.
///
/// A wrong key, a tampered field, and corrupted storage are deliberately
/// indistinguishable in the returned error, and no plaintext is ever
/// released on failure.
pub fn decrypt(key: &VaultKey, envelope: &SecretEnvelope) -> Result<Vec<u8>> {
    let nonce = Nonce::from_slice(&envelope.nonce);

    // Build the cipher from the raw key bytes.
    let cipher =
        Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| VaultError::AuthenticationFailure)?;

    // Reassemble ciphertext || tag, the layout the AEAD verifies.
    let mut sealed = Vec::with_capacity(envelope.ciphertext.len() + TAG_LEN);
    sealed.extend_from_slice(&envelope.ciphertext);
    sealed.extend_from_slice(&envelope.tag);

    // Decrypt and verify the auth tag.
    cipher
        .decrypt(nonce, sealed.as_slice())
        .map_err(|_| VaultError::AuthenticationFailure)
}
