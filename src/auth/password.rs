//! Password Hashing and Verification
//!
//! Passwords are hashed with bcrypt. The plaintext is first reduced to a
//! SHA-256 hex digest so every input fits inside bcrypt's 72-byte window;
//! without it two long passwords sharing a prefix would verify as equal.

use bcrypt::{hash, verify};
use sha2::{Digest, Sha256};
use thiserror::Error;

const BCRYPT_COST: u32 = 10;

#[derive(Debug, Error)]
pub enum HashError {
    #[error("bcrypt failure: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("hashing worker failed: {0}")]
    Worker(String),
}

fn prehash(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Hash a password with a fresh random salt.
///
/// # Errors
/// Returns `HashError` only if bcrypt cannot obtain randomness.
pub fn hash_password(password: &str) -> Result<String, HashError> {
    Ok(hash(prehash(password), BCRYPT_COST)?)
}

/// Verify a password against a stored hash.
///
/// A mismatch is `Ok(false)`; an error means the stored hash is malformed.
pub fn check_password_hash(password: &str, hashed: &str) -> Result<bool, HashError> {
    Ok(verify(prehash(password), hashed)?)
}

/// `hash_password` on the blocking pool, keeping bcrypt off the request workers.
pub async fn spawn_hash_password(password: String) -> Result<String, HashError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| HashError::Worker(e.to_string()))?
}

/// `check_password_hash` on the blocking pool.
pub async fn spawn_check_password_hash(password: String, hashed: String) -> Result<bool, HashError> {
    tokio::task::spawn_blocking(move || check_password_hash(&password, &hashed))
        .await
        .map_err(|e| HashError::Worker(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password() {
        let password = "04234";
        let hash = hash_password(password).expect("Failed to hash password");

        assert_ne!(password, hash);
        assert!(hash.starts_with("$2"));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("same-password").unwrap();
        let second = hash_password("same-password").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_check_password_hash() {
        let hash = hash_password("correct horse").expect("Failed to hash password");

        assert!(check_password_hash("correct horse", &hash).unwrap());
        assert!(!check_password_hash("correct horsf", &hash).unwrap());
        assert!(!check_password_hash("", &hash).unwrap());
    }

    #[test]
    fn test_long_passwords_are_not_truncated() {
        let base = "x".repeat(80);
        let hash = hash_password(&format!("{}a", base)).unwrap();

        assert!(!check_password_hash(&format!("{}b", base), &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let result = check_password_hash("password", "not-a-bcrypt-hash");
        assert!(matches!(result, Err(HashError::Bcrypt(_))));
    }

    #[tokio::test]
    async fn test_spawned_hash_round_trip() {
        let hash = spawn_hash_password("hunter2".to_string()).await.unwrap();
        let matches = spawn_check_password_hash("hunter2".to_string(), hash)
            .await
            .unwrap();

        assert!(matches);
    }
}
