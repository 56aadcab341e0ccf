//! Configuration for the token service

use jsonwebtoken::Algorithm;
use rg_shared::JwtConfig;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Secret for signing access tokens
    pub access_secret: String,
    /// Secret for signing refresh tokens, must differ from the access secret
    pub refresh_secret: String,
    /// JWT signing algorithm (HMAC family)
    pub algorithm: Algorithm,
    /// Access token lifetime in seconds
    pub access_token_expiry_secs: i64,
    /// Refresh token lifetime in seconds
    pub refresh_token_expiry_secs: i64,
    pub issuer: String,
    pub audience: String,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::from(&JwtConfig::default())
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(jwt: &JwtConfig) -> Self {
        Self {
            access_secret: jwt.access_secret.clone(),
            refresh_secret: jwt.refresh_secret.clone(),
            algorithm: Algorithm::HS256,
            access_token_expiry_secs: jwt.access_token_expiry,
            refresh_token_expiry_secs: jwt.refresh_token_expiry,
            issuer: jwt.issuer.clone(),
            audience: jwt.audience.clone(),
        }
    }
}
