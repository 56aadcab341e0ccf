//! MySQL repository implementations

pub mod blacklist_repository_impl;
pub mod user_repository_impl;

pub use blacklist_repository_impl::MySqlTokenBlacklistRepository;
pub use user_repository_impl::MySqlUserRepository;
