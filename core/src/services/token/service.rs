//! Main token service implementation

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Deserialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::entities::token::{
    expiry_after, token_fingerprint, BlacklistEntry, Claims, TokenKind, TokenPair,
};
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::{TokenBlacklistRepository, UserRepository};

use super::config::TokenServiceConfig;

/// Signing material for one token kind
struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl KeyPair {
    fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// Only the expiry is needed when revoking a token without verifying it
#[derive(Debug, Deserialize)]
struct ExpiryClaim {
    exp: i64,
}

/// Issues, verifies, rotates and revokes JWT access/refresh token pairs
///
/// Access and refresh tokens are signed with separate secrets. Consumed and
/// signed-out tokens are recorded in the blacklist until their natural
/// expiry.
pub struct TokenService<U: UserRepository, B: TokenBlacklistRepository> {
    users: Arc<U>,
    blacklist: Arc<B>,
    config: TokenServiceConfig,
    access_keys: KeyPair,
    refresh_keys: KeyPair,
    validation: Validation,
}

impl<U: UserRepository, B: TokenBlacklistRepository> TokenService<U, B> {
    /// Creates a new token service instance
    ///
    /// # Returns
    ///
    /// * `Ok(TokenService)` - Ready to sign tokens
    /// * `Err(DomainError::Config)` - A secret is missing or a lifetime is not positive
    pub fn new(users: Arc<U>, blacklist: Arc<B>, config: TokenServiceConfig) -> DomainResult<Self> {
        if config.access_secret.trim().is_empty() {
            return Err(DomainError::Config {
                message: "access token secret is not configured".to_string(),
            });
        }
        if config.refresh_secret.trim().is_empty() {
            return Err(DomainError::Config {
                message: "refresh token secret is not configured".to_string(),
            });
        }
        if config.access_token_expiry_secs <= 0 || config.refresh_token_expiry_secs <= 0 {
            return Err(DomainError::Config {
                message: "token lifetimes must be positive".to_string(),
            });
        }
        // A lifetime that overflows the calendar would fail every issuance
        let now = Utc::now();
        if expiry_after(now, config.access_token_expiry_secs).is_none()
            || expiry_after(now, config.refresh_token_expiry_secs).is_none()
        {
            return Err(DomainError::Config {
                message: "token lifetime is out of range".to_string(),
            });
        }
        if !matches!(
            config.algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(DomainError::Config {
                message: format!("unsupported signing algorithm {:?}", config.algorithm),
            });
        }
        if config.access_secret == config.refresh_secret {
            warn!("Access and refresh tokens share a signing secret");
        }

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.validate_exp = true;
        validation.leeway = 0;

        Ok(Self {
            users,
            blacklist,
            access_keys: KeyPair::from_secret(&config.access_secret),
            refresh_keys: KeyPair::from_secret(&config.refresh_secret),
            config,
            validation,
        })
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Generates a new token pair (access + refresh tokens) for a user
    pub fn issue_token_pair(&self, user: &User) -> DomainResult<TokenPair> {
        let access_claims = self.claims_for(user, TokenKind::Access)?;
        let refresh_claims = self.claims_for(user, TokenKind::Refresh)?;

        let pair = TokenPair {
            access_token: self.encode_claims(&access_claims)?,
            refresh_token: self.encode_claims(&refresh_claims)?,
            access_expires_at: expiry_of(&access_claims)?,
            refresh_expires_at: expiry_of(&refresh_claims)?,
        };

        debug!(user_id = %user.id, "Issued token pair");
        Ok(pair)
    }

    /// Verifies an access token and loads its user
    ///
    /// Order of checks: presence, signature and expiry, blacklist, user.
    /// An expired token therefore reports `TokenExpired` whether or not it
    /// was also revoked.
    pub async fn verify_access(&self, token: Option<&str>) -> DomainResult<User> {
        let token = present(token)?;
        let claims = self.decode_claims(token, TokenKind::Access)?;

        if self.blacklist.contains(&token_fingerprint(token)).await? {
            debug!(user_id = %claims.sub, "Rejected revoked access token");
            return Err(TokenError::InvalidToken.into());
        }

        self.load_user(&claims).await
    }

    /// Exchanges a refresh token for a new pair and invalidates it
    ///
    /// The consumed token is blacklisted with its original expiry through an
    /// atomic insert. When two callers race with the same token only the one
    /// whose insert lands gets the new pair; the other sees `InvalidToken`.
    pub async fn rotate(&self, refresh_token: Option<&str>) -> DomainResult<TokenPair> {
        let token = present(refresh_token)?;
        let token_hash = token_fingerprint(token);

        if self.blacklist.contains(&token_hash).await? {
            warn!("Refresh token replay rejected");
            return Err(TokenError::InvalidToken.into());
        }

        let claims = self.decode_claims(token, TokenKind::Refresh)?;
        let user = self.load_user(&claims).await?;
        let pair = self.issue_token_pair(&user)?;

        let entry = BlacklistEntry::new(token_hash, expiry_of(&claims)?);
        if !self.blacklist.insert_if_absent(entry).await? {
            warn!(user_id = %user.id, "Concurrent rotation lost the race for a refresh token");
            return Err(TokenError::InvalidToken.into());
        }

        info!(user_id = %user.id, "Rotated refresh token");
        Ok(pair)
    }

    /// Revokes whichever of the two tokens are present
    ///
    /// Tokens are not verified: a forged or expired token is revoked just the
    /// same, and tokens whose expiry cannot be read are skipped. Calling this
    /// twice is harmless.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of tokens newly blacklisted by this call
    /// * `Err(DomainError)` - Blacklist storage failed
    pub async fn sign_out(
        &self,
        access_token: Option<&str>,
        refresh_token: Option<&str>,
    ) -> DomainResult<usize> {
        let mut revoked = 0;

        for token in [access_token, refresh_token].into_iter().flatten() {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let Some(expires_at) = peek_expiry(token) else {
                debug!("Skipping undecodable token at sign-out");
                continue;
            };
            if self
                .blacklist
                .insert_if_absent(BlacklistEntry::for_token(token, expires_at))
                .await?
            {
                revoked += 1;
            }
        }

        info!(revoked, "Signed out");
        Ok(revoked)
    }

    /// Decodes and verifies a token with the key for `kind`
    pub fn decode_claims(&self, token: &str, kind: TokenKind) -> Result<Claims, TokenError> {
        let keys = self.keys(kind);
        let data = decode::<Claims>(token, &keys.decoding, &self.validation).map_err(|e| {
            match (e.kind(), kind) {
                (ErrorKind::ExpiredSignature, TokenKind::Access) => TokenError::TokenExpired,
                (ErrorKind::ExpiredSignature, TokenKind::Refresh) => {
                    TokenError::RefreshTokenExpired
                }
                _ => TokenError::InvalidToken,
            }
        })?;

        if data.claims.typ != kind {
            return Err(TokenError::InvalidToken);
        }
        Ok(data.claims)
    }

    /// Encodes claims into a JWT with the key matching `claims.typ`
    pub(crate) fn encode_claims(&self, claims: &Claims) -> DomainResult<String> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.keys(claims.typ).encoding)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    fn claims_for(&self, user: &User, kind: TokenKind) -> DomainResult<Claims> {
        let lifetime = match kind {
            TokenKind::Access => self.config.access_token_expiry_secs,
            TokenKind::Refresh => self.config.refresh_token_expiry_secs,
        };
        Claims::new(
            kind,
            user.id,
            &user.email,
            lifetime,
            &self.config.issuer,
            &self.config.audience,
        )
        .ok_or(DomainError::Token(TokenError::TokenGenerationFailed))
    }

    fn keys(&self, kind: TokenKind) -> &KeyPair {
        match kind {
            TokenKind::Access => &self.access_keys,
            TokenKind::Refresh => &self.refresh_keys,
        }
    }

    async fn load_user(&self, claims: &Claims) -> DomainResult<User> {
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| TokenError::InvalidToken)?;
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }
}

/// Reads `exp` from a token without checking its signature
pub fn peek_expiry(token: &str) -> Option<DateTime<Utc>> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<ExpiryClaim>(token, &DecodingKey::from_secret(&[]), &validation).ok()?;
    DateTime::<Utc>::from_timestamp(data.claims.exp, 0)
}

fn present(token: Option<&str>) -> Result<&str, TokenError> {
    match token.map(str::trim) {
        Some(t) if !t.is_empty() => Ok(t),
        _ => Err(TokenError::MissingToken),
    }
}

fn expiry_of(claims: &Claims) -> DomainResult<DateTime<Utc>> {
    claims
        .expires_at()
        .ok_or_else(|| DomainError::Token(TokenError::TokenGenerationFailed))
}
