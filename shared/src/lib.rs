//! Shared utilities and common types for the Renewal Guard server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Error codes and the JSON error envelope
//! - Response wrappers
//! - Validation and duration helpers

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, CorsConfig, DatabaseConfig, Environment, JwtConfig, ServerConfig,
    StorageBackend,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{ApiResponse, HealthResponse};
pub use utils::{duration, validation};
