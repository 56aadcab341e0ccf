//! Mock implementation of TokenBlacklistRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::BlacklistEntry;
use crate::errors::DomainError;

use super::trait_::TokenBlacklistRepository;

/// Mock blacklist repository for testing
pub struct MockTokenBlacklistRepository {
    entries: Arc<RwLock<HashMap<String, BlacklistEntry>>>,
    fail_writes: AtomicBool,
}

impl MockTokenBlacklistRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make subsequent inserts fail with a storage error
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn get(&self, token_hash: &str) -> Option<BlacklistEntry> {
        self.entries.read().await.get(token_hash).cloned()
    }
}

impl Default for MockTokenBlacklistRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenBlacklistRepository for MockTokenBlacklistRepository {
    async fn insert_if_absent(&self, entry: BlacklistEntry) -> Result<bool, DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::internal("blacklist unavailable"));
        }

        let mut entries = self.entries.write().await;
        if entries.contains_key(&entry.token_hash) {
            return Ok(false);
        }
        entries.insert(entry.token_hash.clone(), entry);
        Ok(true)
    }

    async fn contains(&self, token_hash: &str) -> Result<bool, DomainError> {
        Ok(self.entries.read().await.contains_key(token_hash))
    }

    async fn purge_expired(&self) -> Result<usize, DomainError> {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        let initial_count = entries.len();

        entries.retain(|_, entry| !entry.is_expired_at(now));

        Ok(initial_count - entries.len())
    }
}
