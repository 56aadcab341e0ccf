//! Mapping from domain errors to HTTP responses
//!
//! Every failure leaves the API as an [`ErrorResponse`] body with a
//! machine-readable code. Internal failures are logged and reported without
//! details.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use rg_core::errors::{AuthError, DomainError, TokenError};
use rg_shared::{error_codes, ErrorResponse};

/// Error returned by handlers and the auth middleware
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Failure reported by a core service
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Request body failed DTO validation
    #[error(transparent)]
    Validation(#[from] validator::ValidationErrors),

    /// Request body could not be parsed
    #[error("{0}")]
    BadRequest(String),

    /// No route matched
    #[error("Not found")]
    NotFound,
}

/// HTTP status for a domain error
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Token(TokenError::TokenGenerationFailed) => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Token(_) => StatusCode::UNAUTHORIZED,
        DomainError::Auth(AuthError::UserNotFound) => StatusCode::NOT_FOUND,
        DomainError::Auth(AuthError::UserAlreadyExists) => StatusCode::CONFLICT,
        DomainError::Auth(AuthError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
        DomainError::Auth(AuthError::RegistrationDisabled) => StatusCode::FORBIDDEN,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Config { .. } | DomainError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn domain_body(error: &DomainError) -> ErrorResponse {
    match error {
        DomainError::Config { .. }
        | DomainError::Internal { .. }
        | DomainError::Token(TokenError::TokenGenerationFailed) => {
            log::error!("Internal error: {}", error);
            ErrorResponse::new(error_codes::INTERNAL_SERVER_ERROR, "Internal server error")
        }
        DomainError::Validation(err) => {
            ErrorResponse::new(error_codes::VALIDATION_ERROR, err.to_string())
                .add_detail(err.field(), vec![err.to_string()])
        }
        _ => ErrorResponse::new(error.code(), error.to_string()),
    }
}

fn validation_body(errors: &validator::ValidationErrors) -> ErrorResponse {
    let mut headline = None;
    let mut body = ErrorResponse::new(error_codes::VALIDATION_ERROR, "");

    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);
    for (field, field_errors) in fields {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
            .collect();
        if headline.is_none() {
            headline = messages.first().cloned();
        }
        body = body.add_detail(field, messages);
    }

    body.error = headline.unwrap_or_else(|| "Invalid input".to_string());
    body
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(err) => status_for(err),
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Domain(err) => domain_body(err),
            ApiError::Validation(errors) => validation_body(errors),
            ApiError::BadRequest(msg) => ErrorResponse::new(error_codes::VALIDATION_ERROR, msg.clone()),
            ApiError::NotFound => ErrorResponse::new(
                error_codes::NOT_FOUND,
                "The requested resource was not found",
            ),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
