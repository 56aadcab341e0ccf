//! Shared setup for API integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;

use rg_api::routes::auth::AppState;
use rg_core::domain::entities::token::{Claims, TokenKind};
use rg_core::services::auth::{AuthService, AuthServiceConfig};
use rg_core::services::token::{TokenService, TokenServiceConfig};
use rg_infra::memory::{InMemoryTokenBlacklist, InMemoryUserRepository};
use rg_shared::CorsConfig;

pub const ACCESS_SECRET: &str = "api-test-access-secret";
pub const REFRESH_SECRET: &str = "api-test-refresh-secret";

pub type TestState = AppState<InMemoryUserRepository, InMemoryTokenBlacklist>;

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub users: Arc<InMemoryUserRepository>,
    pub blacklist: Arc<InMemoryTokenBlacklist>,
    pub cors: CorsConfig,
}

pub fn token_config() -> TokenServiceConfig {
    TokenServiceConfig {
        access_secret: ACCESS_SECRET.to_string(),
        refresh_secret: REFRESH_SECRET.to_string(),
        ..TokenServiceConfig::default()
    }
}

pub fn context() -> TestContext {
    let users = Arc::new(InMemoryUserRepository::new());
    let blacklist = Arc::new(InMemoryTokenBlacklist::new());
    let token_service = TokenService::new(users.clone(), blacklist.clone(), token_config())
        .expect("Failed to create token service");
    let auth_service = AuthService::new(
        users.clone(),
        Arc::new(token_service),
        AuthServiceConfig::fast_hashing(),
    );

    TestContext {
        state: web::Data::new(AppState {
            auth_service: Arc::new(auth_service),
            storage: "memory".to_string(),
            health_checks: Vec::new(),
        }),
        users,
        blacklist,
        cors: CorsConfig::default(),
    }
}

/// Signs a token of `kind` for `user_id` that expired a minute ago
pub fn expired_token(kind: TokenKind, user_id: Uuid, email: &str) -> String {
    let config = token_config();
    let mut claims =
        Claims::new(kind, user_id, email, 60, &config.issuer, &config.audience).unwrap();
    claims.iat = Utc::now().timestamp() - 120;
    claims.exp = Utc::now().timestamp() - 60;

    let secret = match kind {
        TokenKind::Access => ACCESS_SECRET,
        TokenKind::Refresh => REFRESH_SECRET,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}
