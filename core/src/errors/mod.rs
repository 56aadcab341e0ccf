//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{AuthError, TokenError, ValidationError};

use rg_shared::error_codes;
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    /// Misconfiguration detected at startup, e.g. a missing signing secret
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Storage or other unexpected failure; details stay server side
    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl DomainError {
    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    /// Machine-readable code exposed to API clients
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Config { .. } | DomainError::Internal { .. } => {
                error_codes::INTERNAL_SERVER_ERROR
            }
            DomainError::Auth(err) => err.code(),
            DomainError::Token(err) => err.code(),
            DomainError::Validation(_) => error_codes::VALIDATION_ERROR,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
