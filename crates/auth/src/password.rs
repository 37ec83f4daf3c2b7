//! Password hashing for configured console accounts.
//!
//! PHC-format argon2 hashes; verification never reveals whether the hash
//! or the password was at fault.

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to obtain salt entropy: {0}")]
    Entropy(String),

    #[error("failed to hash password: {0}")]
    Hash(String),
}

/// Hash a password into a PHC string suitable for configuration storage.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|e| PasswordError::Entropy(e.to_string()))?;
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| PasswordError::Hash(e.to_string()))?;

    let phc = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hash(e.to_string()))?
        .to_string();

    Ok(phc)
}

/// Whether `hash` parses as a PHC string. Configuration uses this to
/// reject unusable stored hashes at startup instead of at login time.
pub fn is_phc_hash(hash: &str) -> bool {
    PasswordHash::new(hash).is_ok()
}

/// Verify a password against a stored PHC hash. A malformed hash verifies
/// as `false`.
pub fn verify_password(hash: &str, password: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
