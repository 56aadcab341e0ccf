//! In-memory repositories
//!
//! Used when `STORAGE_BACKEND=memory` and by integration tests. State lives
//! for the lifetime of the process.

pub mod token_blacklist;
pub mod user_repository;

pub use token_blacklist::InMemoryTokenBlacklist;
pub use user_repository::InMemoryUserRepository;
