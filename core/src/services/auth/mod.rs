//! Authentication service module
//!
//! Account-facing use cases built on top of the token service:
//! - Email/password sign-up and sign-in
//! - Current user lookup from an access token
//! - Refresh token rotation and sign-out

mod config;
mod password;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use password::{hash_password, verify_password};
pub use service::AuthService;
