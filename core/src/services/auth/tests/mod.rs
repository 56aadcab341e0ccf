
use std::sync::Arc;

use crate::repositories::{MockTokenBlacklistRepository, MockUserRepository};
use crate::services::auth::{AuthService, AuthServiceConfig};
use crate::services::token::{TokenService, TokenServiceConfig};

pub(super) type TestAuthService = AuthService<MockUserRepository, MockTokenBlacklistRepository>;

pub(super) struct Fixture {
    pub service: TestAuthService,
    pub users: Arc<MockUserRepository>,
    pub blacklist: Arc<MockTokenBlacklistRepository>,
}

pub(super) fn fixture_with(config: AuthServiceConfig) -> Fixture {
    let users = Arc::new(MockUserRepository::new());
    let blacklist = Arc::new(MockTokenBlacklistRepository::new());
    let token_config = TokenServiceConfig {
        access_secret: "test-access-secret".to_string(),
        refresh_secret: "test-refresh-secret".to_string(),
        ..TokenServiceConfig::default()
    };
    let token_service = TokenService::new(users.clone(), blacklist.clone(), token_config)
        .expect("Failed to create token service");

    Fixture {
        service: AuthService::new(users.clone(), Arc::new(token_service), config),
        users,
        blacklist,
    }
}

pub(super) fn fixture() -> Fixture {
    fixture_with(AuthServiceConfig::fast_hashing())
}
