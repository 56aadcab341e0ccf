//! Configuration module with business-specific sub-modules
//!
//! - `auth` - JWT signing secrets and token lifetimes
//! - `cache` - Redis connection used by the token blacklist
//! - `database` - MySQL connection and pool configuration
//! - `environment` - Environment detection and storage backend selection
//! - `server` - HTTP server and CORS configuration

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

pub use auth::JwtConfig;
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, StorageBackend};
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,

    /// Where users and blacklist entries are persisted
    pub storage: StorageBackend,

    pub server: ServerConfig,

    pub database: DatabaseConfig,

    pub jwt: JwtConfig,

    pub cache: CacheConfig,

    #[serde(default)]
    pub cors: CorsConfig,

    /// Interval between blacklist purge runs, in seconds
    #[serde(default = "default_blacklist_purge_interval")]
    pub blacklist_purge_interval: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            storage: StorageBackend::default(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            jwt: JwtConfig::default(),
            cache: CacheConfig::default(),
            cors: CorsConfig::default(),
            blacklist_purge_interval: default_blacklist_purge_interval(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let blacklist_purge_interval = std::env::var("BLACKLIST_PURGE_INTERVAL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_blacklist_purge_interval);

        Self {
            environment: Environment::from_env(),
            storage: StorageBackend::from_env(),
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
            cache: CacheConfig::from_env(),
            cors: CorsConfig::from_env(),
            blacklist_purge_interval,
        }
    }
}

fn default_blacklist_purge_interval() -> u64 {
    3600
}
