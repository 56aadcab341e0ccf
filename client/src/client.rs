//! Authenticated HTTP client

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use rg_shared::ApiResponse;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::refresh::{HttpTokenRefresher, RefreshCoordinator};
use crate::store::{MemoryTokenStore, StoredTokens, TokenStore};

/// Session payload of sign-up and sign-in
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: Value,
    #[serde(flatten)]
    pub tokens: StoredTokens,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client that keeps a session alive across access token expiry
///
/// Every request carries the stored access token. A `401` triggers one
/// rotation through the session's [`RefreshCoordinator`] and one replay of
/// the request; any other status is returned as is.
#[derive(Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    config: ClientConfig,
    store: Arc<dyn TokenStore>,
    coordinator: Arc<RefreshCoordinator>,
}

impl AuthClient {
    /// Client with an in-memory session and an HTTP refresher
    ///
    /// # Errors
    ///
    /// `ClientError::Http` if the HTTP client cannot be built
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;
        let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
        let refresher = Arc::new(HttpTokenRefresher::new(http.clone(), &config));
        let coordinator = Arc::new(RefreshCoordinator::new(store.clone(), refresher));
        Ok(Self::with_parts(config, http, store, coordinator))
    }

    /// Client over caller-supplied storage and coordinator
    ///
    /// `coordinator` must be built over the same `store`.
    pub fn with_parts(
        config: ClientConfig,
        http: reqwest::Client,
        store: Arc<dyn TokenStore>,
        coordinator: Arc<RefreshCoordinator>,
    ) -> Self {
        Self {
            http,
            config,
            store,
            coordinator,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn coordinator(&self) -> &Arc<RefreshCoordinator> {
        &self.coordinator
    }

    pub async fn tokens(&self) -> Option<StoredTokens> {
        self.store.load().await
    }

    pub async fn set_tokens(&self, tokens: StoredTokens) {
        self.store.save(tokens).await;
    }

    /// Sends a request with the session token, rotating once on `401`
    ///
    /// # Errors
    ///
    /// - `ClientError::NotAuthenticated` - `401` and no stored session
    /// - `ClientError::ReauthenticationRequired` - rotation was rejected, session cleared
    /// - `ClientError::RateLimited` - refresh endpoint answered 429, session kept
    /// - `ClientError::Http` - transport failure
    #[instrument(skip(self, body))]
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> ClientResult<reqwest::Response> {
        let stored = self.store.load().await;
        let access = stored.as_ref().map(|t| t.access_token.as_str());

        let response = self.send(method.clone(), path, body, access).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        let Some(stale) = access else {
            return Err(ClientError::NotAuthenticated);
        };

        debug!("Access token rejected, rotating");
        let fresh = self.coordinator.rotate(stale).await?;
        self.send(method, path, body, Some(&fresh.access_token)).await
    }

    /// `GET` and decode the success envelope's `data`
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.execute(Method::GET, path, None).await?;
        decode(response).await
    }

    /// `POST` a JSON body and decode the success envelope's `data`
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)
            .map_err(|e| ClientError::Unexpected(format!("unserializable body: {e}")))?;
        let response = self.execute(Method::POST, path, Some(&body)).await?;
        decode(response).await
    }

    /// Creates an account and stores its session
    pub async fn sign_up(&self, name: &str, email: &str, password: &str) -> ClientResult<Value> {
        let response = self
            .send(
                Method::POST,
                &self.auth_path("sign-up"),
                Some(&json!({ "name": name, "email": email, "password": password })),
                None,
            )
            .await?;
        // sign-up answers with the session at the top level
        let session: Session = decode_raw(response).await?;
        self.store.save(session.tokens).await;
        Ok(session.user)
    }

    /// Signs in and stores the session
    pub async fn sign_in(&self, email: &str, password: &str) -> ClientResult<Value> {
        let response = self
            .send(
                Method::POST,
                &self.auth_path("sign-in"),
                Some(&json!({ "email": email, "password": password })),
                None,
            )
            .await?;
        let session: Session = decode(response).await?;
        self.store.save(session.tokens).await;
        Ok(session.user)
    }

    /// Current user, rotating tokens if the access token expired
    pub async fn me(&self) -> ClientResult<Value> {
        let response = self.execute(Method::GET, &self.auth_path("me"), None).await?;
        let mut body: Value = decode_raw(response).await?;
        body.get_mut("user")
            .map(Value::take)
            .ok_or_else(|| ClientError::Unexpected("response carried no user".to_string()))
    }

    /// Revokes both tokens on the server and forgets them locally
    ///
    /// The local session is cleared even when the server call fails.
    pub async fn sign_out(&self) -> ClientResult<()> {
        let Some(tokens) = self.store.load().await else {
            return Ok(());
        };
        self.store.clear().await;

        let response = self
            .send(
                Method::POST,
                &self.auth_path("sign-out"),
                Some(&json!({ "refreshToken": tokens.refresh_token })),
                Some(&tokens.access_token),
            )
            .await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        Ok(())
    }

    fn auth_path(&self, route: &str) -> String {
        format!("{}/{}", self.config.auth_prefix.trim_end_matches('/'), route)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        access_token: Option<&str>,
    ) -> ClientResult<reqwest::Response> {
        let mut request = self.http.request(method, self.config.url(path));
        if let Some(token) = access_token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }
}

impl std::fmt::Debug for AuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthClient")
            .field("config", &self.config)
            .field("coordinator", &self.coordinator)
            .finish()
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
    let envelope: ApiResponse<T> = decode_raw(response).await?;
    envelope
        .into_data()
        .ok_or_else(|| ClientError::Unexpected("response carried no data".to_string()))
}

async fn decode_raw<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    Ok(response.json().await?)
}

async fn api_error(response: reqwest::Response) -> ClientError {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => ClientError::Api {
            status,
            code: body.code.unwrap_or_default(),
            message: body.error.unwrap_or_default(),
        },
        Err(_) => ClientError::Api {
            status,
            code: String::new(),
            message: status.canonical_reason().unwrap_or("").to_string(),
        },
    }
}
