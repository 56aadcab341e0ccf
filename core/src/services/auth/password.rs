//! Password hashing on the blocking thread pool

use crate::errors::{DomainError, DomainResult};

/// Hash a password with bcrypt
pub async fn hash_password(password: &str, cost: u32) -> DomainResult<String> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| DomainError::internal(format!("password hashing task failed: {}", e)))?
        .map_err(|e| DomainError::internal(format!("password hashing failed: {}", e)))
}

/// Check a password against a bcrypt hash
///
/// A malformed stored hash is treated as a mismatch.
pub async fn verify_password(password: &str, hash: &str) -> DomainResult<bool> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false))
        .await
        .map_err(|e| DomainError::internal(format!("password verification task failed: {}", e)))
}
