//! Configuration for the authentication service

use rg_shared::validation::MIN_PASSWORD_LENGTH;

/// bcrypt only looks at the first 72 bytes of a password
pub const MAX_PASSWORD_LENGTH: usize = 72;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Whether to allow registration of new users
    pub allow_registration: bool,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    pub min_password_length: usize,
    pub max_password_length: usize,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            allow_registration: true,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            min_password_length: MIN_PASSWORD_LENGTH,
            max_password_length: MAX_PASSWORD_LENGTH,
        }
    }
}

impl AuthServiceConfig {
    /// Reads `ALLOW_REGISTRATION` and `BCRYPT_COST`, keeping defaults for
    /// missing or unparsable values
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let allow_registration = std::env::var("ALLOW_REGISTRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.allow_registration);
        let bcrypt_cost = std::env::var("BCRYPT_COST")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|cost| (4..=31).contains(cost))
            .unwrap_or(defaults.bcrypt_cost);

        Self {
            allow_registration,
            bcrypt_cost,
            ..defaults
        }
    }

    /// Cheapest accepted bcrypt cost, for tests
    pub fn fast_hashing() -> Self {
        Self {
            bcrypt_cost: 4,
            ..Self::default()
        }
    }
}
