//! Authentication service implementation

use std::sync::Arc;

use rg_shared::validation::{normalize_email, validators, MAX_NAME_LENGTH};
use tracing::{debug, info, warn};

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::User;
use crate::domain::value_objects::{AuthSession, UserProfile};
use crate::errors::{AuthError, DomainResult, ValidationError};
use crate::repositories::{TokenBlacklistRepository, UserRepository};
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;
use super::password::{hash_password, verify_password};

/// Account use cases: sign-up, sign-in, current user, refresh and sign-out
pub struct AuthService<U: UserRepository, B: TokenBlacklistRepository> {
    /// User repository for account lookups and creation
    user_repository: Arc<U>,
    /// Token service for issuing, verifying and revoking tokens
    token_service: Arc<TokenService<U, B>>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U: UserRepository, B: TokenBlacklistRepository> AuthService<U, B> {
    /// Create a new authentication service
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService<U, B>>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            config,
        }
    }

    pub fn token_service(&self) -> &Arc<TokenService<U, B>> {
        &self.token_service
    }

    /// Register a new password account and sign it in
    ///
    /// # Returns
    ///
    /// * `Ok(AuthSession)` - Profile of the new user and its first token pair
    /// * `Err(DomainError::Validation)` - Name, email or password rejected
    /// * `Err(DomainError::Auth(AuthError::UserAlreadyExists))` - Email taken
    pub async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<AuthSession> {
        if !self.config.allow_registration {
            return Err(AuthError::RegistrationDisabled.into());
        }

        let name = name.trim();
        let email = normalize_email(email);
        self.validate_sign_up(name, &email, password)?;

        if self.user_repository.exists_by_email(&email).await? {
            debug!(%email, "Sign-up rejected, email already registered");
            return Err(AuthError::UserAlreadyExists.into());
        }

        let password_hash = hash_password(password, self.config.bcrypt_cost).await?;
        let user = self
            .user_repository
            .create(User::new(name.to_string(), email, password_hash))
            .await?;

        let tokens = self.token_service.issue_token_pair(&user)?;
        info!(user_id = %user.id, "User signed up");
        Ok(AuthSession::new(user.profile(), tokens))
    }

    /// Authenticate with email and password
    ///
    /// Accounts without a password (OAuth only) never match.
    pub async fn sign_in(&self, email: &str, password: &str) -> DomainResult<AuthSession> {
        let email = normalize_email(email);
        if !validators::not_empty(&email) {
            return Err(ValidationError::RequiredField {
                field: "email".to_string(),
            }
            .into());
        }
        if password.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "password".to_string(),
            }
            .into());
        }

        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let Some(hash) = user.password_hash.as_deref() else {
            warn!(user_id = %user.id, "Password sign-in attempted on account without password");
            return Err(AuthError::InvalidCredentials.into());
        };
        if !verify_password(password, hash).await? {
            warn!(user_id = %user.id, "Sign-in failed, wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let tokens = self.token_service.issue_token_pair(&user)?;
        info!(user_id = %user.id, "User signed in");
        Ok(AuthSession::new(user.profile(), tokens))
    }

    /// Profile of the user owning a valid access token
    pub async fn me(&self, access_token: Option<&str>) -> DomainResult<UserProfile> {
        let user = self.token_service.verify_access(access_token).await?;
        Ok(user.profile())
    }

    /// Exchange a refresh token for a new pair
    pub async fn refresh(&self, refresh_token: Option<&str>) -> DomainResult<TokenPair> {
        self.token_service.rotate(refresh_token).await
    }

    /// Revoke the given tokens, returning how many were newly revoked
    pub async fn sign_out(
        &self,
        access_token: Option<&str>,
        refresh_token: Option<&str>,
    ) -> DomainResult<usize> {
        self.token_service
            .sign_out(access_token, refresh_token)
            .await
    }

    fn validate_sign_up(&self, name: &str, email: &str, password: &str) -> DomainResult<()> {
        if !validators::not_empty(name) {
            return Err(ValidationError::RequiredField {
                field: "name".to_string(),
            }
            .into());
        }
        if !validators::length_between(name, 1, MAX_NAME_LENGTH) {
            return Err(ValidationError::InvalidLength {
                field: "name".to_string(),
                min: 1,
                max: MAX_NAME_LENGTH,
            }
            .into());
        }
        if !validators::not_empty(email) {
            return Err(ValidationError::RequiredField {
                field: "email".to_string(),
            }
            .into());
        }
        if !validators::is_valid_email(email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        if password.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "password".to_string(),
            }
            .into());
        }
        // bcrypt limit is in bytes
        if password.chars().count() < self.config.min_password_length
            || password.len() > self.config.max_password_length
        {
            return Err(ValidationError::InvalidLength {
                field: "password".to_string(),
                min: self.config.min_password_length,
                max: self.config.max_password_length,
            }
            .into());
        }
        Ok(())
    }
}
