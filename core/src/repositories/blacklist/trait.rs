//! Blacklist repository trait for revoked and consumed tokens.

use async_trait::async_trait;

use crate::domain::entities::token::BlacklistEntry;
use crate::errors::DomainError;

/// Repository trait for the token blacklist
///
/// Entries are keyed by token fingerprint. Implementations must make
/// [`insert_if_absent`](TokenBlacklistRepository::insert_if_absent) a single
/// atomic operation (unique key, `SET NX`, or a write lock): refresh token
/// rotation relies on exactly one of two concurrent inserts reporting `true`.
#[async_trait]
pub trait TokenBlacklistRepository: Send + Sync {
    /// Insert an entry unless one with the same hash already exists
    ///
    /// # Returns
    /// * `Ok(true)` - This call inserted the entry
    /// * `Ok(false)` - The token was already blacklisted
    /// * `Err(DomainError)` - Storage failure
    async fn insert_if_absent(&self, entry: BlacklistEntry) -> Result<bool, DomainError>;

    /// Check whether a token fingerprint is blacklisted
    async fn contains(&self, token_hash: &str) -> Result<bool, DomainError>;

    /// Delete entries whose original token has expired
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of entries removed
    async fn purge_expired(&self) -> Result<usize, DomainError>;
}
