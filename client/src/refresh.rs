//! Token rotation against the refresh endpoint
//!
//! A refresh token is single use: once one rotation consumed it, a second
//! rotation with the same token is rejected by the server. The
//! [`RefreshCoordinator`] therefore lets only one rotation run per session
//! and hands its result to everyone who queued behind it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use rg_shared::ApiResponse;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::store::{StoredTokens, TokenStore};

/// Exchanges a refresh token for a new pair
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    /// # Errors
    ///
    /// - `ClientError::ReauthenticationRequired` - the server rejected the token
    /// - `ClientError::RateLimited` - the server answered 429
    /// - `ClientError::Http` / `ClientError::Unexpected` - transport or protocol failure
    async fn refresh(&self, refresh_token: &str) -> ClientResult<StoredTokens>;
}

/// [`TokenRefresher`] that calls `POST {auth_prefix}/refresh-token`
#[derive(Debug, Clone)]
pub struct HttpTokenRefresher {
    http: reqwest::Client,
    url: String,
}

impl HttpTokenRefresher {
    pub fn new(http: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            http,
            url: config.refresh_url(),
        }
    }
}

#[async_trait]
impl TokenRefresher for HttpTokenRefresher {
    #[instrument(skip_all)]
    async fn refresh(&self, refresh_token: &str) -> ClientResult<StoredTokens> {
        let response = self
            .http
            .post(&self.url)
            .json(&json!({ "refreshToken": refresh_token }))
            .send()
            .await?;

        let status = response.status();
        match status {
            s if s.is_success() => {
                let body: ApiResponse<StoredTokens> = response.json().await?;
                body.into_data().ok_or_else(|| {
                    ClientError::Unexpected("refresh response carried no tokens".to_string())
                })
            }
            StatusCode::TOO_MANY_REQUESTS => Err(ClientError::RateLimited {
                retry_after: retry_after(&response),
            }),
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND => {
                let code = error_code(response).await;
                debug!(%status, code = code.as_deref().unwrap_or("-"), "Refresh token rejected");
                Err(ClientError::ReauthenticationRequired)
            }
            other => Err(ClientError::Unexpected(format!(
                "refresh endpoint answered {other}"
            ))),
        }
    }
}

#[derive(Deserialize)]
struct ErrorCode {
    code: Option<String>,
}

async fn error_code(response: reqwest::Response) -> Option<String> {
    response.json::<ErrorCode>().await.ok().and_then(|b| b.code)
}

fn retry_after(response: &reqwest::Response) -> Option<u64> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

/// Single-flight rotation shared by all requests of one session
///
/// Callers pass the access token their request was rejected with. The first
/// caller to take the lock rotates; anyone who queued behind it finds a
/// different token in the store and reuses it instead of rotating again.
pub struct RefreshCoordinator {
    store: Arc<dyn TokenStore>,
    refresher: Arc<dyn TokenRefresher>,
    in_flight: Mutex<()>,
    rotations: AtomicU64,
}

impl RefreshCoordinator {
    pub fn new(store: Arc<dyn TokenStore>, refresher: Arc<dyn TokenRefresher>) -> Self {
        Self {
            store,
            refresher,
            in_flight: Mutex::new(()),
            rotations: AtomicU64::new(0),
        }
    }

    /// Returns a token pair newer than `stale_access`
    ///
    /// On rejection the stored tokens are cleared and
    /// `ReauthenticationRequired` is returned. On 429 the tokens are kept
    /// and `RateLimited` is returned. Other failures leave the store alone.
    pub async fn rotate(&self, stale_access: &str) -> ClientResult<StoredTokens> {
        let _guard = self.in_flight.lock().await;

        let current = self
            .store
            .load()
            .await
            .ok_or(ClientError::ReauthenticationRequired)?;

        if current.access_token != stale_access {
            debug!("Reusing tokens rotated by a concurrent request");
            return Ok(current);
        }

        self.rotations.fetch_add(1, Ordering::Relaxed);
        match self.refresher.refresh(&current.refresh_token).await {
            Ok(tokens) => {
                self.store.save(tokens.clone()).await;
                info!("Token pair rotated");
                Ok(tokens)
            }
            Err(ClientError::RateLimited { retry_after }) => {
                warn!(?retry_after, "Token refresh rate limited, keeping session");
                Err(ClientError::RateLimited { retry_after })
            }
            Err(ClientError::ReauthenticationRequired) => {
                self.store.clear().await;
                warn!("Refresh token rejected, session cleared");
                Err(ClientError::ReauthenticationRequired)
            }
            Err(e) => {
                warn!(error = %e, "Token refresh failed");
                Err(e)
            }
        }
    }

    /// Number of rotations sent to the refresher so far
    pub fn rotations(&self) -> u64 {
        self.rotations.load(Ordering::Relaxed)
    }
}

impl std::fmt::Debug for RefreshCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshCoordinator")
            .field("rotations", &self.rotations())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryTokenStore;
    use std::time::Duration;

    /// Hands out numbered pairs after a short delay, or a fixed error
    struct ScriptedRefresher {
        calls: AtomicU64,
        failure: Option<fn() -> ClientError>,
    }

    impl ScriptedRefresher {
        fn ok() -> Self {
            Self {
                calls: AtomicU64::new(0),
                failure: None,
            }
        }

        fn failing(failure: fn() -> ClientError) -> Self {
            Self {
                calls: AtomicU64::new(0),
                failure: Some(failure),
            }
        }
    }

    #[async_trait]
    impl TokenRefresher for ScriptedRefresher {
        async fn refresh(&self, refresh_token: &str) -> ClientResult<StoredTokens> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            tokio::time::sleep(Duration::from_millis(20)).await;
            if let Some(failure) = self.failure {
                return Err(failure());
            }
            Ok(StoredTokens::new(
                format!("access-{n}"),
                format!("{refresh_token}-next"),
            ))
        }
    }

    fn coordinator(refresher: Arc<ScriptedRefresher>) -> (RefreshCoordinator, Arc<MemoryTokenStore>) {
        let store = Arc::new(MemoryTokenStore::with_tokens(StoredTokens::new(
            "access-0", "refresh-0",
        )));
        (RefreshCoordinator::new(store.clone(), refresher), store)
    }

    #[tokio::test]
    async fn test_rotation_persists_new_pair() {
        let refresher = Arc::new(ScriptedRefresher::ok());
        let (coordinator, store) = coordinator(refresher.clone());

        let tokens = coordinator.rotate("access-0").await.unwrap();

        assert_eq!(tokens, StoredTokens::new("access-1", "refresh-0-next"));
        assert_eq!(store.load().await, Some(tokens));
        assert_eq!(coordinator.rotations(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_rotations_coalesce() {
        let refresher = Arc::new(ScriptedRefresher::ok());
        let (coordinator, _store) = coordinator(refresher.clone());
        let coordinator = Arc::new(coordinator);

        let handles: Vec<_> = (0..5)
            .map(|_| {
                let coordinator = coordinator.clone();
                tokio::spawn(async move { coordinator.rotate("access-0").await })
            })
            .collect();

        for handle in handles {
            let tokens = handle.await.unwrap().unwrap();
            assert_eq!(tokens.access_token, "access-1");
        }
        assert_eq!(refresher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rejection_clears_store() {
        let refresher = Arc::new(ScriptedRefresher::failing(|| {
            ClientError::ReauthenticationRequired
        }));
        let (coordinator, store) = coordinator(refresher);

        let err = coordinator.rotate("access-0").await.unwrap_err();

        assert!(matches!(err, ClientError::ReauthenticationRequired));
        assert!(store.load().await.is_none());

        // Queued callers see the cleared session without another call
        let err = coordinator.rotate("access-0").await.unwrap_err();
        assert!(matches!(err, ClientError::ReauthenticationRequired));
        assert_eq!(coordinator.rotations(), 1);
    }

    #[tokio::test]
    async fn test_rate_limit_keeps_store() {
        let refresher = Arc::new(ScriptedRefresher::failing(|| ClientError::RateLimited {
            retry_after: Some(30),
        }));
        let (coordinator, store) = coordinator(refresher);

        let err = coordinator.rotate("access-0").await.unwrap_err();

        assert!(matches!(
            err,
            ClientError::RateLimited {
                retry_after: Some(30)
            }
        ));
        assert_eq!(
            store.load().await,
            Some(StoredTokens::new("access-0", "refresh-0"))
        );
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_store() {
        let refresher = Arc::new(ScriptedRefresher::failing(|| {
            ClientError::Unexpected("boom".to_string())
        }));
        let (coordinator, store) = coordinator(refresher);

        assert!(coordinator.rotate("access-0").await.is_err());
        assert!(store.load().await.is_some());
    }
}
