//! # Renewal Guard Core
//!
//! Core business logic and domain layer for the Renewal Guard backend.
//! This crate contains domain entities, the token and authentication
//! services, repository interfaces, and the error types that the
//! infrastructure and HTTP layers build on.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience. Submodule names such as
// `token` and `user` exist in several layers, so only types are lifted.
pub use domain::{
    token_fingerprint, AuthSession, BlacklistEntry, Claims, TokenKind, TokenPair, User,
    UserProfile,
};
pub use errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
pub use repositories::{TokenBlacklistRepository, UserRepository};
pub use services::{
    peek_expiry, AuthService, AuthServiceConfig, BlacklistCleanupConfig, BlacklistCleanupService,
    CleanupResult, TokenService, TokenServiceConfig,
};
