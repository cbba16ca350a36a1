//! Password hashing and verification using Argon2id.
//!
//! Hashes are PHC strings carrying their own salt and parameters, so
//! verification needs nothing but the stored string.

use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use super::PasswordError;

/// Hash a password with a fresh random salt.
///
/// This is deliberately expensive. Async callers should run it on the
/// blocking pool rather than on a runtime worker.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hashing(e.to_string()))
}

/// Verify a candidate password against a stored PHC hash.
///
/// Returns `false` on mismatch and on a malformed hash; never errors.
/// The digest comparison inside `argon2` is constant-time.
pub fn verify_password(candidate: &str, password_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(password_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .is_ok()
}

/// Runs a full verification against a fixed throwaway hash.
///
/// Always returns `false`. Login calls this for unknown usernames so they
/// cost the same Argon2 work as a wrong password.
pub fn verify_without_user(candidate: &str) -> bool {
    static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

    let Some(hash) = DUMMY_HASH.get_or_init(|| hash_password("postboard-dummy-password").ok())
    else {
        return false;
    };

    std::hint::black_box(verify_password(candidate, hash));
    false
}
