//! Redis-backed token blacklist
//!
//! Each entry is a key `<prefix>:blacklist:<hash>` written with `SET NX EX`
//! so Redis drops it when the original token would have expired. The value
//! carries a per-insert nonce so a retried SET can tell whether it won.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use rg_core::domain::entities::token::BlacklistEntry;
use rg_core::errors::DomainError;
use rg_core::repositories::TokenBlacklistRepository;

use super::redis_client::RedisClient;

/// Token blacklist stored in Redis
#[derive(Clone)]
pub struct RedisTokenBlacklist {
    client: RedisClient,
}

impl RedisTokenBlacklist {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn key(&self, token_hash: &str) -> String {
        self.client.key(&format!("blacklist:{}", token_hash))
    }
}

/// Seconds until `entry` is dead, at least one so the key is still written
pub(crate) fn ttl_seconds(entry: &BlacklistEntry) -> u64 {
    let remaining = (entry.expires_at - Utc::now()).num_seconds();
    remaining.max(1) as u64
}

/// Value written for an entry: expiry plus a nonce unique to the insert
pub(crate) fn claim_value(entry: &BlacklistEntry) -> String {
    format!("{}:{}", entry.expires_at.timestamp(), Uuid::new_v4())
}

#[async_trait]
impl TokenBlacklistRepository for RedisTokenBlacklist {
    async fn insert_if_absent(&self, entry: BlacklistEntry) -> Result<bool, DomainError> {
        let inserted = self
            .client
            .set_if_absent_with_expiry(
                &self.key(&entry.token_hash),
                &claim_value(&entry),
                ttl_seconds(&entry),
            )
            .await?;
        Ok(inserted)
    }

    async fn contains(&self, token_hash: &str) -> Result<bool, DomainError> {
        Ok(self.client.exists(&self.key(token_hash)).await?)
    }

    /// Redis expires keys itself
    async fn purge_expired(&self) -> Result<usize, DomainError> {
        Ok(0)
    }
}
