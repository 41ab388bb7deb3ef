use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use recipe_errors::AppError;

/// Argon2id hashing with a fresh random salt per password. The work runs on
/// the blocking pool so request tasks are not stalled.
#[derive(Clone, Default)]
pub struct CredentialHasher;

impl CredentialHasher {
    pub fn new() -> Self {
        Self
    }

    pub async fn hash(&self, password: String) -> Result<String, AppError> {
        tokio::task::spawn_blocking(move || hash_blocking(&password))
            .await
            .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
    }

    /// `Ok(false)` when the password does not match. A malformed stored hash is
    /// treated as a mismatch.
    pub async fn verify(&self, password: String, stored_hash: String) -> Result<bool, AppError> {
        tokio::task::spawn_blocking(move || verify_blocking(&password, &stored_hash))
            .await
            .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))
    }
}

fn hash_blocking(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

fn verify_blocking(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!("Stored password hash is malformed: {}", e);
            false
        }
    }
}
