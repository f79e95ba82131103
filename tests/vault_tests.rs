//! Integration tests for the credvault vault module: the request-scoped
//! codec and the per-user login record.

use credvault::crypto::salt::Salt;
use credvault::crypto::{decrypt, derive_vault_key, encrypt};
use credvault::errors::VaultError;
use credvault::vault::record::PasswordRecord;
use credvault::vault::{encrypt_all, encrypt_one, unlock_and_decrypt_all};

// ---------------------------------------------------------------------------
// Single-secret flow
// ---------------------------------------------------------------------------

#[test]
fn store_and_unlock_a_secret() {
    let salt = Salt::from_hex("a1b2c3d4e5f6a1b2c3d4e5f6a1b2c3d4").expect("salt");
    let master = "correct horse battery staple";

    let envelope = encrypt_one(master, &salt, "my-secret-password-123").expect("encrypt");
    let stored = envelope.to_string();

    // A later request re-derives the key from the same inputs and gets
    // the plaintext back.
    let results = unlock_and_decrypt_all(master, &salt, &[stored.clone()]).expect("unlock");
    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].as_ref().expect("decrypt"),
        "my-secret-password-123"
    );

    // The wrong master password derives a key fine but fails the auth
    // tag on every item.
    let wrong = unlock_and_decrypt_all("correct horse battery stable", &salt, &[stored])
        .expect("unlock with wrong password");
    assert!(matches!(wrong[0], Err(VaultError::AuthenticationFailure)));
}

#[test]
fn codec_envelope_decrypts_through_the_crypto_layer() {
    let salt = Salt::generate();
    let master = "interop-master";

    let envelope = encrypt_one(master, &salt, "interop").expect("encrypt");

    // Deriving the key directly must open the same envelope.
    let key = derive_vault_key(master, &salt).expect("derive");
    let plaintext = decrypt(&key, &envelope).expect("decrypt");
    assert_eq!(plaintext, b"interop");
}

// ---------------------------------------------------------------------------
// Batch round-trip and per-item isolation
// ---------------------------------------------------------------------------

#[test]
fn batch_round_trip_preserves_order() {
    let salt = Salt::generate();
    let master = "batch-master";
    let secrets = vec![
        "alpha-secret".to_string(),
        "beta-secret".to_string(),
        "gamma-secret".to_string(),
    ];

    let envelopes = encrypt_all(master, &salt, &secrets).expect("encrypt batch");
    assert_eq!(envelopes.len(), 3);

    let stored: Vec<String> = envelopes.iter().map(|e| e.to_string()).collect();
    let results = unlock_and_decrypt_all(master, &salt, &stored).expect("unlock");

    let recovered: Vec<String> = results
        .into_iter()
        .map(|item| item.expect("every item should decrypt"))
        .collect();
    assert_eq!(recovered, secrets);
}

#[test]
fn corrupted_item_does_not_poison_the_batch() {
    let salt = Salt::generate();
    let master = "isolation-master";
    let secrets = vec![
        "first".to_string(),
        "second".to_string(),
        "third".to_string(),
    ];

    let envelopes = encrypt_all(master, &salt, &secrets).expect("encrypt batch");
    let mut stored: Vec<String> = envelopes.iter().map(|e| e.to_string()).collect();

    // Flip one ciphertext byte in the middle item.
    let mut tampered = envelopes[1].clone();
    tampered.ciphertext[0] ^= 0x01;
    stored[1] = tampered.to_string();

    let results = unlock_and_decrypt_all(master, &salt, &stored).expect("unlock");

    assert_eq!(results[0].as_ref().expect("first"), "first");
    assert!(matches!(results[1], Err(VaultError::AuthenticationFailure)));
    assert_eq!(results[2].as_ref().expect("third"), "third");
}

#[test]
fn malformed_item_occupies_its_slot() {
    let salt = Salt::generate();
    let master = "slot-master";
    let secrets = vec!["keep-me".to_string(), "and-me".to_string()];

    let envelopes = encrypt_all(master, &salt, &secrets).expect("encrypt batch");
    let stored = vec![
        envelopes[0].to_string(),
        "deadbeef:cafebabe".to_string(),
        envelopes[1].to_string(),
    ];

    let results = unlock_and_decrypt_all(master, &salt, &stored).expect("unlock");

    assert_eq!(results.len(), 3, "slots must match input order and count");
    assert_eq!(results[0].as_ref().expect("first"), "keep-me");
    assert!(matches!(results[1], Err(VaultError::MalformedEnvelope(_))));
    assert_eq!(results[2].as_ref().expect("third"), "and-me");
}

#[test]
fn empty_batch_yields_empty_results() {
    let results = unlock_and_decrypt_all("pw", &Salt::generate(), &[]).expect("unlock");
    assert!(results.is_empty());
}

#[test]
fn authenticated_non_utf8_payload_fails_closed() {
    let salt = Salt::generate();
    let master = "utf8-master";

    // Seal raw bytes through the crypto layer; the codec only hands out
    // strings, so this envelope authenticates but cannot decode.
    let key = derive_vault_key(master, &salt).expect("derive");
    let envelope = encrypt(&key, &[0xFF, 0xFE, 0x80, 0x00]).expect("encrypt bytes");

    let results =
        unlock_and_decrypt_all(master, &salt, &[envelope.to_string()]).expect("unlock");
    assert!(matches!(results[0], Err(VaultError::AuthenticationFailure)));
}

// ---------------------------------------------------------------------------
// Login record
// ---------------------------------------------------------------------------

#[test]
fn record_create_and_verify() {
    let record = PasswordRecord::create("alice", "login-password-1");

    assert_eq!(record.username, "alice");
    assert_eq!(record.salt.to_hex().len(), 32);
    assert!(record.verify("login-password-1"));
    assert!(!record.verify("login-password-2"));
}

#[test]
fn record_serializes_with_hex_boundary_forms() {
    let record = PasswordRecord::create("bob", "bobs-login");

    let json = serde_json::to_value(&record).expect("serialize");
    let digest = json["digest"].as_str().expect("digest is a string");
    let salt = json["salt"].as_str().expect("salt is a string");

    assert_eq!(digest.len(), 128);
    assert_eq!(salt.len(), 32);
    assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    assert!(salt.chars().all(|c| c.is_ascii_hexdigit()));

    let restored: PasswordRecord = serde_json::from_value(json).expect("deserialize");
    assert_eq!(restored, record);
    assert!(restored.verify("bobs-login"));
}

#[test]
fn records_for_the_same_password_differ() {
    // Fresh salt per account, so identical passwords never share a
    // digest.
    let a = PasswordRecord::create("carol", "shared-password");
    let b = PasswordRecord::create("dave", "shared-password");

    assert_ne!(a.salt, b.salt);
    assert_ne!(a.digest, b.digest);
}
