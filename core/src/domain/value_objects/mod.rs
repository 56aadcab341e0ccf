//! Value objects representing immutable domain concepts.

pub mod auth_session;
pub mod user_profile;

pub use auth_session::AuthSession;
pub use user_profile::UserProfile;
