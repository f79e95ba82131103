//! Vault orchestration layer.
//!
//! This module provides:
//! - Request-scoped batch encryption and decryption (`codec`)
//! - The per-user login record (`record`)

pub mod codec;
pub mod record;

// Re-export the most commonly used items.
pub use codec::{encrypt_all, encrypt_one, unlock_and_decrypt_all};
pub use record::PasswordRecord;
