//! Token signing configuration

use serde::{Deserialize, Serialize};

use crate::utils::duration::parse_duration_secs;

/// JWT configuration for the access/refresh token pair
///
/// Access and refresh tokens are signed with distinct secrets so that a
/// refresh token can never be presented as an access token and vice versa.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret used to sign access tokens
    pub access_secret: String,

    /// Access token lifetime in seconds
    pub access_token_expiry: i64,

    /// Secret used to sign refresh tokens
    pub refresh_secret: String,

    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_secret: String::from(DEFAULT_ACCESS_SECRET),
            access_token_expiry: 900,      // 15 minutes
            refresh_secret: String::from(DEFAULT_REFRESH_SECRET),
            refresh_token_expiry: 604800,  // 7 days
            issuer: String::from("renewal-guard"),
            audience: String::from("renewal-guard-api"),
        }
    }
}

const DEFAULT_ACCESS_SECRET: &str = "access-secret-change-in-production";
const DEFAULT_REFRESH_SECRET: &str = "refresh-secret-change-in-production";

impl JwtConfig {
    /// Create a configuration with explicit secrets and default lifetimes
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            ..Default::default()
        }
    }

    /// Load from environment variables
    ///
    /// Lifetimes accept plain seconds or a suffixed duration such as `15m`
    /// or `7d`. Missing secrets are left empty so that token service
    /// construction fails at startup instead of signing with a known key.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let access_secret = std::env::var("JWT_SECRET_KEY").unwrap_or_default();
        let refresh_secret = std::env::var("JWT_REFRESH_SECRET_KEY").unwrap_or_default();

        let access_token_expiry = std::env::var("JWT_EXPIRATION_TIME")
            .ok()
            .and_then(|v| parse_duration_secs(&v))
            .unwrap_or(defaults.access_token_expiry);
        let refresh_token_expiry = std::env::var("JWT_REFRESH_EXPIRATION_TIME")
            .or_else(|_| std::env::var("JWT_FRESH_EXPIRATION_TIME"))
            .ok()
            .and_then(|v| parse_duration_secs(&v))
            .unwrap_or(defaults.refresh_token_expiry);

        Self {
            access_secret,
            access_token_expiry,
            refresh_secret,
            refresh_token_expiry,
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or(defaults.audience),
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Check if either secret is still the built-in placeholder
    pub fn is_using_default_secret(&self) -> bool {
        self.access_secret == DEFAULT_ACCESS_SECRET || self.refresh_secret == DEFAULT_REFRESH_SECRET
    }

    /// Both secrets present and different from each other
    pub fn has_distinct_secrets(&self) -> bool {
        !self.access_secret.is_empty()
            && !self.refresh_secret.is_empty()
            && self.access_secret != self.refresh_secret
    }
}
