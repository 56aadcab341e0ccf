//! Unit tests for token issuance, verification and sign-out

use std::sync::Arc;

use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;

use crate::domain::entities::token::{token_fingerprint, Claims, TokenKind};
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::{MockTokenBlacklistRepository, MockUserRepository};
use crate::services::token::{peek_expiry, TokenService, TokenServiceConfig};

use super::{expired_token, fixture, test_config};

fn token_error(result: Result<impl std::fmt::Debug, DomainError>) -> TokenError {
    match result {
        Err(DomainError::Token(e)) => e,
        other => panic!("expected token error, got {:?}", other),
    }
}

#[test]
fn test_missing_secret_is_config_error() {
    let users = Arc::new(MockUserRepository::new());
    let blacklist = Arc::new(MockTokenBlacklistRepository::new());

    let config = TokenServiceConfig {
        access_secret: String::new(),
        ..test_config()
    };
    let result = TokenService::new(users.clone(), blacklist.clone(), config);
    assert!(matches!(result, Err(DomainError::Config { .. })));

    let config = TokenServiceConfig {
        refresh_secret: "  ".to_string(),
        ..test_config()
    };
    let result = TokenService::new(users, blacklist, config);
    assert!(matches!(result, Err(DomainError::Config { .. })));
}

#[test]
fn test_out_of_range_lifetime_is_config_error() {
    let users = Arc::new(MockUserRepository::new());
    let blacklist = Arc::new(MockTokenBlacklistRepository::new());

    // "100000000000d" parses to a positive number of seconds past chrono's range
    let lifetime = rg_shared::utils::duration::parse_duration_secs("100000000000d").unwrap();
    let config = TokenServiceConfig {
        refresh_token_expiry_secs: lifetime,
        ..test_config()
    };
    let result = TokenService::new(users.clone(), blacklist.clone(), config);
    assert!(matches!(result, Err(DomainError::Config { .. })));

    let config = TokenServiceConfig {
        access_token_expiry_secs: i64::MAX,
        ..test_config()
    };
    let result = TokenService::new(users, blacklist, config);
    assert!(matches!(result, Err(DomainError::Config { .. })));
}

#[test]
fn test_non_positive_lifetime_is_config_error() {
    let config = TokenServiceConfig {
        access_token_expiry_secs: 0,
        ..test_config()
    };
    let result = TokenService::new(
        Arc::new(MockUserRepository::new()),
        Arc::new(MockTokenBlacklistRepository::new()),
        config,
    );
    assert!(matches!(result, Err(DomainError::Config { .. })));
}

#[tokio::test]
async fn test_issue_token_pair() {
    let f = fixture().await;
    let pair = f.service.issue_token_pair(&f.user).unwrap();

    assert!(!pair.access_token.is_empty());
    assert!(!pair.refresh_token.is_empty());
    assert_ne!(pair.access_token, pair.refresh_token);
    assert!(pair.refresh_expires_at > pair.access_expires_at);

    let access = f
        .service
        .decode_claims(&pair.access_token, TokenKind::Access)
        .unwrap();
    assert_eq!(access.sub, f.user.id.to_string());
    assert_eq!(access.email, "a@x.com");
    assert_eq!(access.exp - access.iat, f.service.config().access_token_expiry_secs);
}

#[tokio::test]
async fn test_tokens_are_signed_with_separate_keys() {
    let f = fixture().await;
    let pair = f.service.issue_token_pair(&f.user).unwrap();

    assert_eq!(
        f.service.decode_claims(&pair.refresh_token, TokenKind::Access),
        Err(TokenError::InvalidToken)
    );
    assert_eq!(
        f.service.decode_claims(&pair.access_token, TokenKind::Refresh),
        Err(TokenError::InvalidToken)
    );
}

#[tokio::test]
async fn test_verify_access_returns_user() {
    let f = fixture().await;
    let pair = f.service.issue_token_pair(&f.user).unwrap();

    let user = f.service.verify_access(Some(&pair.access_token)).await.unwrap();
    assert_eq!(user.id, f.user.id);
    assert_eq!(user.email, f.user.email);
}

#[tokio::test]
async fn test_verify_access_missing_token() {
    let f = fixture().await;
    assert_eq!(
        token_error(f.service.verify_access(None).await),
        TokenError::MissingToken
    );
    assert_eq!(
        token_error(f.service.verify_access(Some("   ")).await),
        TokenError::MissingToken
    );
}

#[tokio::test]
async fn test_verify_access_malformed_token() {
    let f = fixture().await;
    assert_eq!(
        token_error(f.service.verify_access(Some("not-a-jwt")).await),
        TokenError::InvalidToken
    );
}

#[tokio::test]
async fn test_verify_access_wrong_signature() {
    let f = fixture().await;
    let claims = Claims::new(
        TokenKind::Access,
        f.user.id,
        &f.user.email,
        900,
        &f.service.config().issuer,
        &f.service.config().audience,
    )
    .unwrap();
    let forged = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"someone-else"),
    )
    .unwrap();

    assert_eq!(
        token_error(f.service.verify_access(Some(&forged)).await),
        TokenError::InvalidToken
    );
}

#[tokio::test]
async fn test_verify_access_expired_token() {
    let f = fixture().await;
    let token = expired_token(&f.service, &f.user, TokenKind::Access, 10);

    assert_eq!(
        token_error(f.service.verify_access(Some(&token)).await),
        TokenError::TokenExpired
    );
}

#[tokio::test]
async fn test_expired_access_token_reports_expiry_even_when_blacklisted() {
    let f = fixture().await;
    let token = expired_token(&f.service, &f.user, TokenKind::Access, 10);
    f.service.sign_out(Some(&token), None).await.unwrap();

    assert_eq!(
        token_error(f.service.verify_access(Some(&token)).await),
        TokenError::TokenExpired
    );
}

#[tokio::test]
async fn test_verify_access_user_deleted() {
    let f = fixture().await;
    let pair = f.service.issue_token_pair(&f.user).unwrap();
    f.users.remove(f.user.id).await;

    let result = f.service.verify_access(Some(&pair.access_token)).await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::UserNotFound))));
}

#[tokio::test]
async fn test_verify_access_rejects_non_uuid_subject() {
    let f = fixture().await;
    let mut claims = Claims::new(
        TokenKind::Access,
        Uuid::new_v4(),
        "a@x.com",
        900,
        &f.service.config().issuer,
        &f.service.config().audience,
    )
    .unwrap();
    claims.sub = "not-a-uuid".to_string();
    let token = f.service.encode_claims(&claims).unwrap();

    assert_eq!(
        token_error(f.service.verify_access(Some(&token)).await),
        TokenError::InvalidToken
    );
}

#[tokio::test]
async fn test_sign_out_revokes_both_tokens() {
    let f = fixture().await;
    let pair = f.service.issue_token_pair(&f.user).unwrap();

    let revoked = f
        .service
        .sign_out(Some(&pair.access_token), Some(&pair.refresh_token))
        .await
        .unwrap();
    assert_eq!(revoked, 2);

    assert_eq!(
        token_error(f.service.verify_access(Some(&pair.access_token)).await),
        TokenError::InvalidToken
    );
    assert_eq!(
        token_error(f.service.rotate(Some(&pair.refresh_token)).await),
        TokenError::InvalidToken
    );
}

#[tokio::test]
async fn test_sign_out_keeps_original_expiry() {
    let f = fixture().await;
    let pair = f.service.issue_token_pair(&f.user).unwrap();
    f.service.sign_out(None, Some(&pair.refresh_token)).await.unwrap();

    let entry = f
        .blacklist
        .get(&token_fingerprint(&pair.refresh_token))
        .await
        .unwrap();
    assert_eq!(entry.expires_at, pair.refresh_expires_at);
}

#[tokio::test]
async fn test_sign_out_is_idempotent() {
    let f = fixture().await;
    let pair = f.service.issue_token_pair(&f.user).unwrap();

    f.service
        .sign_out(Some(&pair.access_token), Some(&pair.refresh_token))
        .await
        .unwrap();
    let second = f
        .service
        .sign_out(Some(&pair.access_token), Some(&pair.refresh_token))
        .await
        .unwrap();

    assert_eq!(second, 0);
    assert_eq!(f.blacklist.len().await, 2);
}

#[tokio::test]
async fn test_sign_out_tolerates_garbage_and_absent_tokens() {
    let f = fixture().await;

    assert_eq!(f.service.sign_out(None, None).await.unwrap(), 0);
    assert_eq!(
        f.service
            .sign_out(Some("garbage"), Some(""))
            .await
            .unwrap(),
        0
    );
    assert_eq!(f.blacklist.len().await, 0);
}

#[tokio::test]
async fn test_sign_out_propagates_storage_failure() {
    let f = fixture().await;
    let pair = f.service.issue_token_pair(&f.user).unwrap();
    f.blacklist.set_fail_writes(true);

    let result = f.service.sign_out(Some(&pair.access_token), None).await;
    assert!(matches!(result, Err(DomainError::Internal { .. })));
}

#[tokio::test]
async fn test_peek_expiry_ignores_signature() {
    let f = fixture().await;
    let claims =
        Claims::new(TokenKind::Refresh, f.user.id, "a@x.com", 120, "x", "y").unwrap();
    let foreign = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"unknown"),
    )
    .unwrap();

    let expires_at = peek_expiry(&foreign).unwrap();
    assert_eq!(expires_at.timestamp(), claims.exp);
    assert!(peek_expiry("a.b.c").is_none());
}
