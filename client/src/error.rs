//! Client error types

use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by [`crate::AuthClient`]
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure, timeout or undecodable body
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// No session is stored; sign in first
    #[error("not authenticated")]
    NotAuthenticated,

    /// Rotation failed; stored tokens were cleared
    #[error("session expired, sign in again")]
    ReauthenticationRequired,

    /// The refresh endpoint answered 429; stored tokens were kept
    #[error("token refresh rate limited")]
    RateLimited {
        /// Seconds from `Retry-After`, when the server sent one
        retry_after: Option<u64>,
    },

    /// The API answered with its error envelope
    #[error("API error {status}: {code}: {message}")]
    Api {
        status: StatusCode,
        code: String,
        message: String,
    },

    #[error("unexpected response: {0}")]
    Unexpected(String),
}

impl ClientError {
    /// Whether the caller has to sign in again before retrying
    pub fn requires_sign_in(&self) -> bool {
        matches!(self, Self::NotAuthenticated | Self::ReauthenticationRequired)
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_sign_in() {
        assert!(ClientError::ReauthenticationRequired.requires_sign_in());
        assert!(ClientError::NotAuthenticated.requires_sign_in());
        assert!(!ClientError::RateLimited { retry_after: None }.requires_sign_in());
    }

    #[test]
    fn test_api_error_display() {
        let err = ClientError::Api {
            status: StatusCode::CONFLICT,
            code: "USER_ALREADY_EXISTS".to_string(),
            message: "User already exists".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API error 409 Conflict: USER_ALREADY_EXISTS: User already exists"
        );
    }
}
