//! Credential hashing.
//!
//! Argon2id PHC strings throughout; verification accepts any PHC hash the
//! `argon2` crate can parse, so parameters can be tightened later without
//! invalidating stored credentials.

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};

/// Failure to produce a password hash.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("password hashing failed: {0}")]
pub struct HashError(String);

/// Hash a plaintext password into a PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, HashError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|e| HashError(e.to_string()))?;
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| HashError(e.to_string()))?;
    let phc = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| HashError(e.to_string()))?
        .to_string();
    Ok(phc)
}

/// Verify a plaintext password against a stored PHC string.
///
/// An unparseable stored hash counts as a mismatch rather than an error so
/// corrupt rows cannot be used to probe the verifier.
pub fn verify_password(stored: &str, password: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let phc = hash_password("owner123").expect("hashing succeeds");
        assert!(phc.starts_with("$argon2"));
        assert!(verify_password(&phc, "owner123"));
    }

    #[test]
    fn wrong_password_fails() {
        let phc = hash_password("owner123").expect("hashing succeeds");
        assert!(!verify_password(&phc, "owner124"));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let a = hash_password("same").expect("hashing succeeds");
        let b = hash_password("same").expect("hashing succeeds");
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_stored_hash_is_a_mismatch() {
        assert!(!verify_password("not-a-phc-string", "anything"));
    }
}
