//! The per-user login record: username, password digest, salt.
//!
//! One record per username (uniqueness is the persistence layer's
//! invariant, not this crate's). The record hands its salt to every
//! vault operation and its digest to login verification; the digest is
//! only ever recomputed and compared, never reversed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crypto::password::{hash_password, verify_password, PasswordDigest};
use crate::crypto::salt::Salt;

/// A stored user record as the persistence layer sees it.
///
/// `digest` and `salt` serialize as their lowercase-hex storage forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordRecord {
    /// Unique username.
    pub username: String,

    /// PBKDF2-HMAC-SHA512 digest of the login password.
    pub digest: PasswordDigest,

    /// Per-account salt, shared with vault-key derivation.
    pub salt: Salt,

    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl PasswordRecord {
    /// Create the record for a new account: generates the salt and
    /// hashes the login password at the standard cost.
    ///
    /// The salt is fixed here for the lifetime of the account. Both the
    /// login digest and every stored envelope depend on it, so it is
    /// never regenerated afterwards.
    pub fn create(username: &str, password: &str) -> Self {
        let salt = Salt::generate();
        let digest = hash_password(password, &salt);

        Self {
            username: username.to_string(),
            digest,
            salt,
            created_at: Utc::now(),
        }
    }

    /// Check a login attempt against this record, in constant time.
    pub fn verify(&self, password: &str) -> bool {
        verify_password(password, &self.salt, &self.digest)
    }
}
