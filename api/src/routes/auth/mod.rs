//! Authentication route handlers
//!
//! - Sign-up and sign-in with email and password
//! - Current user
//! - Refresh token rotation
//! - Sign-out

pub mod me;
pub mod refresh;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

use std::sync::Arc;

use rg_core::repositories::{TokenBlacklistRepository, UserRepository};
use rg_core::services::auth::AuthService;
use rg_infra::health::HealthCheck;

pub use me::me;
pub use refresh::refresh_token;
pub use sign_in::sign_in;
pub use sign_out::sign_out;
pub use sign_up::sign_up;

/// Application state that holds shared services
pub struct AppState<U, B>
where
    U: UserRepository,
    B: TokenBlacklistRepository,
{
    pub auth_service: Arc<AuthService<U, B>>,
    /// Storage backend name reported by the health check
    pub storage: String,
    /// Backing services pinged by `/health`, empty for in-memory storage
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
}
