//! Business services containing domain logic and use cases.

pub mod auth;
pub mod token;

pub use auth::{AuthService, AuthServiceConfig};
pub use token::{
    peek_expiry, BlacklistCleanupConfig, BlacklistCleanupService, CleanupResult, TokenService,
    TokenServiceConfig,
};
