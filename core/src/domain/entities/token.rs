//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Which key a token was signed with and what it may be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Email of the user at issue time
    pub email: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID, unique per token so same-second tokens differ
    pub jti: String,

    /// Token kind
    pub typ: TokenKind,
}

impl Claims {
    /// Creates claims valid from now for `lifetime_secs` seconds
    ///
    /// Returns `None` when the expiry is not representable.
    pub fn new(
        kind: TokenKind,
        user_id: Uuid,
        email: &str,
        lifetime_secs: i64,
        issuer: &str,
        audience: &str,
    ) -> Option<Self> {
        let now = Utc::now();
        let expiry = expiry_after(now, lifetime_secs)?;

        Some(Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::new_v4().to_string(),
            typ: kind,
        })
    }

    /// Expiry as a timestamp, `None` if `exp` is out of range
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.exp, 0)
    }
}

/// `from + lifetime_secs`, or `None` on overflow
pub fn expiry_after(from: DateTime<Utc>, lifetime_secs: i64) -> Option<DateTime<Utc>> {
    Duration::try_seconds(lifetime_secs).and_then(|lifetime| from.checked_add_signed(lifetime))
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// When the access token stops being accepted
    pub access_expires_at: DateTime<Utc>,

    /// When the refresh token stops being accepted
    pub refresh_expires_at: DateTime<Utc>,
}

impl TokenPair {
    /// Seconds until the access token expires, zero if already expired
    pub fn access_expires_in(&self) -> i64 {
        (self.access_expires_at - Utc::now()).num_seconds().max(0)
    }
}

/// A revoked token, kept until its natural expiry
///
/// Only the SHA-256 fingerprint of the token is stored, never the token
/// itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlacklistEntry {
    /// Hex-encoded SHA-256 of the token string
    pub token_hash: String,

    /// Original expiry of the token; the entry is dead afterwards
    pub expires_at: DateTime<Utc>,

    /// When the token was revoked
    pub created_at: DateTime<Utc>,
}

impl BlacklistEntry {
    pub fn new(token_hash: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            token_hash,
            expires_at,
            created_at: Utc::now(),
        }
    }

    /// Builds an entry for a raw token string
    pub fn for_token(token: &str, expires_at: DateTime<Utc>) -> Self {
        Self::new(token_fingerprint(token), expires_at)
    }

    /// Whether the entry can be purged
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Hex-encoded SHA-256 of a token string, used as the blacklist key
pub fn token_fingerprint(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
