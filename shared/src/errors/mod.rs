//! Shared error codes and the JSON error envelope

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Error body returned by every failing endpoint
///
/// ```json
/// { "success": false, "error": "Token expired", "code": "TOKEN_EXPIRED", "timestamp": "..." }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `false`, mirrors the success envelope
    pub success: bool,

    /// Human-readable error message
    pub error: String,

    /// Machine-readable code from [`error_codes`]
    pub code: String,

    /// Additional error details (field errors, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
            code: code.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Error codes understood by clients
pub mod error_codes {
    pub const MISSING_TOKEN: &str = "MISSING_TOKEN";
    pub const INVALID_TOKEN: &str = "INVALID_TOKEN";
    pub const TOKEN_EXPIRED: &str = "TOKEN_EXPIRED";
    pub const REFRESH_TOKEN_EXPIRED: &str = "REFRESH_TOKEN_EXPIRED";
    pub const USER_NOT_FOUND: &str = "USER_NOT_FOUND";
    pub const USER_ALREADY_EXISTS: &str = "USER_ALREADY_EXISTS";
    pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
    pub const REGISTRATION_DISABLED: &str = "REGISTRATION_DISABLED";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_shape() {
        let body = ErrorResponse::new(error_codes::TOKEN_EXPIRED, "Token expired");
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Token expired");
        assert_eq!(json["code"], "TOKEN_EXPIRED");
        assert!(json.get("details").is_none());
        assert!(json.get("timestamp").is_some());
    }

    #[test]
    fn test_add_detail() {
        let body = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid input")
            .add_detail("email", vec!["must be a valid email"]);
        let details = body.details.unwrap();
        assert_eq!(details["email"][0], "must be a valid email");
    }
}
