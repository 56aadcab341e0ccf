//! Client for the Renewal Guard auth API
//!
//! [`AuthClient`] attaches the stored access token to every request. On a
//! `401` it rotates the token pair once through a shared
//! [`RefreshCoordinator`] and replays the request with the new access token.
//! Concurrent `401`s on the same session coalesce into a single rotation.

pub mod client;
pub mod config;
pub mod error;
pub mod refresh;
pub mod store;

pub use client::{AuthClient, Session};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use refresh::{HttpTokenRefresher, RefreshCoordinator, TokenRefresher};
pub use store::{MemoryTokenStore, StoredTokens, TokenStore};
