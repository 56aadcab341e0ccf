//! Cache module for Redis-backed storage
//!
//! Provides a Redis client with connection retry and a token blacklist that
//! lets Redis expire entries on its own.

pub mod redis_client;
pub mod token_blacklist;


pub use redis_client::RedisClient;
pub use token_blacklist::RedisTokenBlacklist;

pub use rg_shared::CacheConfig;
