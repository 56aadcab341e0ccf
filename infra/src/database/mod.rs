//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management
//! - Schema migrations for `users` and `token_blacklist`
//! - Repository implementations

pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;

pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlTokenBlacklistRepository, MySqlUserRepository};
