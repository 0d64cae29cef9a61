//! Argon2id password hashing in PHC string format.

use argon2::{
    Argon2, PasswordHash,
    password_hash::{PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// Errors that can occur while hashing or checking a password.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Hashing failed.
    #[error("failed to hash password: {0}")]
    Hash(String),

    /// The stored hash is not a valid PHC string.
    #[error("stored password hash is malformed")]
    MalformedHash,

    /// Verification failed for a reason other than a mismatch.
    #[error("failed to verify password: {0}")]
    Verify(String),
}

/// Hashes `password` with a fresh random salt.
///
/// # Errors
///
/// Returns `PasswordError::Hash` if the hasher rejects the input.
///
/// # Example
///
/// ```
/// use tally_core::auth::hash_password;
///
/// let hash = hash_password("1234").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Checks `password` against a stored hash. A mismatch is `Ok(false)`.
///
/// # Errors
///
/// `MalformedHash` if `hash` cannot be parsed, `Verify` for any other
/// failure.
///
/// # Example
///
/// ```
/// use tally_core::auth::{hash_password, verify_password};
///
/// let hash = hash_password("1234").unwrap();
/// assert!(verify_password("1234", &hash).unwrap());
/// assert!(!verify_password("incorrect", &hash).unwrap());
/// ```
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|_| PasswordError::MalformedHash)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::Verify(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_phc_argon2id() {
        let hash = hash_password("1234").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert_ne!(hash, "1234");
    }

    #[test]
    fn test_verify_round() {
        let hash = hash_password("1234").unwrap();
        assert!(verify_password("1234", &hash).unwrap());
        assert!(!verify_password("4321", &hash).unwrap());
    }

    #[test]
    fn test_salts_differ() {
        assert_ne!(hash_password("1234").unwrap(), hash_password("1234").unwrap());
    }

    #[test]
    fn test_malformed_hash() {
        let result = verify_password("1234", "not-a-phc-string");
        assert!(matches!(result, Err(PasswordError::MalformedHash)));
    }
}
