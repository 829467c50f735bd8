/// Password hashing and verification using Argon2id
use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};

use crate::error::{AppError, Result};

/// Hash a password with a freshly generated salt.
/// Returns the hash string suitable for storage in the database.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(rand::thread_rng());
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal("Failed to hash password".to_string()))?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against a stored hash. A mismatch surfaces as
/// `InvalidCredentials` like every other login failure.
pub fn verify_password(password: &str, hash: &str) -> Result<()> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal("Invalid password hash format".to_string()))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "correct horse 1";
        let hash = hash_password(password).unwrap();
        assert!(verify_password(password, &hash).is_ok());
    }

    #[test]
    fn test_wrong_password() {
        let hash = hash_password("correct horse 1").unwrap();
        let err = verify_password("wrong horse 2", &hash).unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("correct horse 1").unwrap();
        let second = hash_password("correct horse 1").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_corrupt_hash_is_internal_error() {
        let err = verify_password("anything1", "not-a-phc-string").unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
