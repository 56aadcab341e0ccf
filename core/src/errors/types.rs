//! Error types for authentication, token handling and input validation

use rg_shared::error_codes;
use thiserror::Error;

/// Account-level authentication errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Registration is disabled")]
    RegistrationDisabled,
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::UserNotFound => error_codes::USER_NOT_FOUND,
            AuthError::UserAlreadyExists => error_codes::USER_ALREADY_EXISTS,
            AuthError::InvalidCredentials => error_codes::INVALID_CREDENTIALS,
            AuthError::RegistrationDisabled => error_codes::REGISTRATION_DISABLED,
        }
    }
}

/// Token verification and rotation errors
///
/// `RefreshTokenExpired` is terminal for a client session: it is never
/// recovered by another rotation and the user has to sign in again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("No token provided")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Refresh token expired, please login again")]
    RefreshTokenExpired,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::MissingToken => error_codes::MISSING_TOKEN,
            TokenError::InvalidToken => error_codes::INVALID_TOKEN,
            TokenError::TokenExpired => error_codes::TOKEN_EXPIRED,
            TokenError::RefreshTokenExpired => error_codes::REFRESH_TOKEN_EXPIRED,
            TokenError::TokenGenerationFailed => error_codes::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    RequiredField { field: String },

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("{field} must be between {min} and {max} characters")]
    InvalidLength {
        field: String,
        min: usize,
        max: usize,
    },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &str {
        match self {
            ValidationError::RequiredField { field } => field,
            ValidationError::InvalidEmail => "email",
            ValidationError::InvalidLength { field, .. } => field,
        }
    }
}
