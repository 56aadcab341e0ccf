mod service_tests;

use std::sync::Arc;

use chrono::Utc;

use crate::domain::entities::token::{Claims, TokenKind};
use crate::domain::entities::user::User;
use crate::repositories::{MockTokenBlacklistRepository, MockUserRepository, UserRepository};
use crate::services::token::{TokenService, TokenServiceConfig};

pub(super) type TestTokenService = TokenService<MockUserRepository, MockTokenBlacklistRepository>;

pub(super) struct Fixture {
    pub service: Arc<TestTokenService>,
    pub users: Arc<MockUserRepository>,
    pub blacklist: Arc<MockTokenBlacklistRepository>,
    pub user: User,
}

pub(super) fn test_config() -> TokenServiceConfig {
    TokenServiceConfig {
        access_secret: "test-access-secret".to_string(),
        refresh_secret: "test-refresh-secret".to_string(),
        ..TokenServiceConfig::default()
    }
}

pub(super) async fn fixture() -> Fixture {
    let users = Arc::new(MockUserRepository::new());
    let blacklist = Arc::new(MockTokenBlacklistRepository::new());
    let service = TokenService::new(users.clone(), blacklist.clone(), test_config())
        .expect("Failed to create token service");

    let user = users
        .create(User::new(
            "A".to_string(),
            "a@x.com".to_string(),
            "hash".to_string(),
        ))
        .await
        .unwrap();

    Fixture {
        service: Arc::new(service),
        users,
        blacklist,
        user,
    }
}

/// Signs a token of `kind` for `user` that expired `seconds_ago` seconds ago
pub(super) fn expired_token(
    service: &TestTokenService,
    user: &User,
    kind: TokenKind,
    seconds_ago: i64,
) -> String {
    let config = service.config();
    let mut claims =
        Claims::new(kind, user.id, &user.email, 60, &config.issuer, &config.audience).unwrap();
    claims.iat = Utc::now().timestamp() - seconds_ago - 60;
    claims.exp = Utc::now().timestamp() - seconds_ago;
    service.encode_claims(&claims).unwrap()
}
