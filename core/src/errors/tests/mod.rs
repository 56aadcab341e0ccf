use super::*;

#[test]
fn test_token_error_codes() {
    assert_eq!(TokenError::MissingToken.code(), "MISSING_TOKEN");
    assert_eq!(TokenError::InvalidToken.code(), "INVALID_TOKEN");
    assert_eq!(TokenError::TokenExpired.code(), "TOKEN_EXPIRED");
    assert_eq!(TokenError::RefreshTokenExpired.code(), "REFRESH_TOKEN_EXPIRED");
}

#[test]
fn test_refresh_expired_message_asks_for_login() {
    assert_eq!(
        TokenError::RefreshTokenExpired.to_string(),
        "Refresh token expired, please login again"
    );
}

#[test]
fn test_domain_error_bridges_codes() {
    let err: DomainError = AuthError::UserNotFound.into();
    assert_eq!(err.code(), "USER_NOT_FOUND");
    assert_eq!(err.to_string(), "User not found");

    let err: DomainError = ValidationError::InvalidEmail.into();
    assert_eq!(err.code(), "VALIDATION_ERROR");

    let err = DomainError::internal("pool timed out");
    assert_eq!(err.code(), "INTERNAL_SERVER_ERROR");
}

#[test]
fn test_validation_error_field() {
    let err = ValidationError::InvalidLength {
        field: "password".to_string(),
        min: 6,
        max: 128,
    };
    assert_eq!(err.field(), "password");
    assert_eq!(err.to_string(), "password must be between 6 and 128 characters");
    assert_eq!(ValidationError::InvalidEmail.field(), "email");
}
