//! Result of a successful sign-up or sign-in.

use crate::domain::entities::TokenPair;
use crate::domain::value_objects::UserProfile;

/// Authenticated user together with a freshly issued token pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub user: UserProfile,
    pub tokens: TokenPair,
}

impl AuthSession {
    pub fn new(user: UserProfile, tokens: TokenPair) -> Self {
        Self { user, tokens }
    }
}
