//! In-memory token blacklist

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use rg_core::domain::entities::token::BlacklistEntry;
use rg_core::errors::DomainError;
use rg_core::repositories::TokenBlacklistRepository;

/// Blacklist keyed by token fingerprint
///
/// Check and insert happen under one write lock, which makes
/// `insert_if_absent` atomic.
#[derive(Clone, Default)]
pub struct InMemoryTokenBlacklist {
    entries: Arc<RwLock<HashMap<String, BlacklistEntry>>>,
}

impl InMemoryTokenBlacklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl TokenBlacklistRepository for InMemoryTokenBlacklist {
    async fn insert_if_absent(&self, entry: BlacklistEntry) -> Result<bool, DomainError> {
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
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before - entries.len();
        if removed > 0 {
            tracing::debug!(removed, "Purged in-memory blacklist entries");
        }
        Ok(removed)
    }
}
