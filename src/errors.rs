use thiserror::Error;

/// All errors that can occur in the vault core.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Boundary errors (rejected before any crypto runs) ---
    #[error("Invalid salt: {0}")]
    InvalidSalt(String),

    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),

    // --- Crypto errors ---
    #[error("Decryption failed: wrong master password or tampered data")]
    AuthenticationFailure,

    #[error("Crypto error: {0}")]
    InternalCrypto(String),
}

/// Convenience type alias for vault-core results.
pub type Result<T> = std::result::Result<T, VaultError>;
