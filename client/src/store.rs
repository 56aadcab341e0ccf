//! Session token storage

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Access and refresh token held by a client session
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTokens {
    #[serde(rename = "token")]
    pub access_token: String,
    pub refresh_token: String,
}

impl StoredTokens {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

impl std::fmt::Debug for StoredTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredTokens")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

/// Persistence for the current session's tokens
///
/// Implementations must be safe to share between concurrent requests.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn load(&self) -> Option<StoredTokens>;

    async fn save(&self, tokens: StoredTokens);

    async fn clear(&self);
}

/// Process-local token store
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: RwLock<Option<StoredTokens>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(tokens: StoredTokens) -> Self {
        Self {
            tokens: RwLock::new(Some(tokens)),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Option<StoredTokens> {
        self.tokens.read().await.clone()
    }

    async fn save(&self, tokens: StoredTokens) {
        *self.tokens.write().await = Some(tokens);
    }

    async fn clear(&self) {
        *self.tokens.write().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_load_clear() {
        let store = MemoryTokenStore::new();
        assert!(store.load().await.is_none());

        store.save(StoredTokens::new("a1", "r1")).await;
        assert_eq!(store.load().await, Some(StoredTokens::new("a1", "r1")));

        store.clear().await;
        assert!(store.load().await.is_none());
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let debug = format!("{:?}", StoredTokens::new("secret-access", "secret-refresh"));
        assert!(!debug.contains("secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_deserializes_api_pair() {
        let tokens: StoredTokens = serde_json::from_value(serde_json::json!({
            "token": "a",
            "refreshToken": "r",
            "expiresIn": 900
        }))
        .unwrap();
        assert_eq!(tokens, StoredTokens::new("a", "r"));
    }
}
