//! Redis cache client implementation
//!
//! Wraps a multiplexed connection with retry on transient failures and
//! exposes the few commands the blacklist needs.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use rg_shared::CacheConfig;

use crate::InfrastructureError;

type RedisFuture<T> = Pin<Box<dyn Future<Output = RedisResult<T>> + Send>>;

/// Redis client with connection retry logic
///
/// Cloning is cheap: clones share the multiplexed connection.
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Configuration used to create this client
    config: CacheConfig,
}

impl RedisClient {
    /// Connect to Redis, retrying with exponential backoff
    ///
    /// # Returns
    /// * `Ok(RedisClient)` - Connected client
    /// * `Err(InfrastructureError::Config)` - The URL could not be parsed
    /// * `Err(InfrastructureError::Cache)` - Every connection attempt failed
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        info!("Creating Redis client with URL: {}", mask_url(&config.url));

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection =
            Self::create_connection_with_retry(client, config.max_retries, config.retry_delay_ms)
                .await?;

        info!("Redis client created successfully");

        Ok(Self { connection, config })
    }

    async fn create_connection_with_retry(
        client: Client,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            match client.get_multiplexed_async_connection().await {
                Ok(connection) => return Ok(connection),
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    // capped at 5 seconds
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Prefix a key with the configured namespace
    pub fn key(&self, key: &str) -> String {
        self.config.make_key(key)
    }

    /// `SET key value NX EX ttl`
    ///
    /// `value` must be unique to this call. The SET is retried on transient
    /// errors, so a first attempt may have landed with its reply lost; a
    /// `nil` reply is then resolved by reading the key back and checking
    /// whether it holds our value.
    ///
    /// # Returns
    /// * `Ok(true)` - This call wrote the key
    /// * `Ok(false)` - The key was already held by another writer
    pub async fn set_if_absent_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<bool, InfrastructureError> {
        let set_key = key.to_string();
        let set_value = value.to_string();

        let reply = self
            .execute_with_retry(move |mut conn| {
                let key = set_key.clone();
                let value = set_value.clone();
                Box::pin(async move {
                    redis::cmd("SET")
                        .arg(key)
                        .arg(value)
                        .arg("NX")
                        .arg("EX")
                        .arg(expiry_seconds)
                        .query_async::<_, Option<String>>(&mut conn)
                        .await
                })
            })
            .await
            .map_err(|e| {
                error!("SET NX failed: {}", e);
                InfrastructureError::Cache(e)
            })?;

        if reply.is_some() {
            return Ok(true);
        }

        let current = self.get(key).await?;
        let won = holds_value(current.as_deref(), value);
        if won {
            debug!("SET NX reply was lost, key holds our value");
        }
        Ok(won)
    }

    /// GET a string value
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        let key = key.to_string();
        self.execute_with_retry(move |mut conn| {
            let key = key.clone();
            Box::pin(async move { conn.get::<_, Option<String>>(key).await })
        })
        .await
        .map_err(|e| {
            error!("GET failed: {}", e);
            InfrastructureError::Cache(e)
        })
    }

    /// Check if a key exists
    pub async fn exists(&self, key: &str) -> Result<bool, InfrastructureError> {
        let key = key.to_string();
        self.execute_with_retry(move |mut conn| {
            let key = key.clone();
            Box::pin(async move { conn.exists::<_, bool>(key).await })
        })
        .await
        .map_err(|e| {
            error!("EXISTS failed: {}", e);
            InfrastructureError::Cache(e)
        })
    }

    /// PING the server
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let response = self
            .execute_with_retry(|mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await?;
        Ok(response == "PONG")
    }

    async fn execute_with_retry<F, T>(&self, operation: F) -> RedisResult<T>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        let mut attempts = 0;
        let mut delay = self.config.retry_delay_ms;

        loop {
            attempts += 1;

            match operation(self.connection.clone()).await {
                Ok(result) => return Ok(result),
                Err(e) if attempts < self.config.max_retries && is_retriable_error(&e) => {
                    warn!(
                        "Redis operation failed (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, self.config.max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Whether a key read back after a `nil` SET NX holds this writer's value
pub(crate) fn holds_value(current: Option<&str>, value: &str) -> bool {
    current == Some(value)
}

/// Whether an error is transient and worth retrying
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError | redis::ErrorKind::BusyLoadingError | redis::ErrorKind::TryAgain
    )
}

/// Hide credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let (Some(at_pos), Some(proto_end)) = (url.find('@'), url.find("://")) {
        return format!("{}****{}", &url[..proto_end + 3], &url[at_pos..]);
    }
    url.to_string()
}
