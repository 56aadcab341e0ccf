//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - Access and refresh token issuance with separate signing secrets
//! - Access token verification against signature, expiry and the blacklist
//! - One-time-use refresh token rotation
//! - Sign-out revocation
//! - Background purge of expired blacklist entries

mod cleanup;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use cleanup::{BlacklistCleanupConfig, BlacklistCleanupService, CleanupResult};
pub use config::TokenServiceConfig;
pub use service::{peek_expiry, TokenService};
