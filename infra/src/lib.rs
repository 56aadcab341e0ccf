//! # Infrastructure Layer
//!
//! Concrete storage for the Renewal Guard backend: implementations of the
//! `UserRepository` and `TokenBlacklistRepository` traits from `rg_core`.
//!
//! ## Architecture
//!
//! - **Database**: MySQL implementations using SQLx
//! - **Cache**: Redis client and a TTL-based token blacklist
//! - **Memory**: in-process stores for development and tests
//! - **Health**: liveness checks behind `/health`
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//! - `redis-cache`: Enable Redis caching support (default)

use rg_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Cache module - Redis client and blacklist
#[cfg(feature = "redis-cache")]
pub mod cache;

/// Liveness checks for the storage backends
pub mod health;

/// In-memory repositories
pub mod memory;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Stored data could not be mapped back to a domain entity
    #[error("Data mapping error: {0}")]
    Mapping(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::internal(err.to_string())
    }
}
