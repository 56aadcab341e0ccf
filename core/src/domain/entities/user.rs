//! User entity representing a registered Renewal Guard account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::UserProfile;

/// User entity representing a registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Lowercased email address, unique across users
    pub email: String,

    /// bcrypt hash, absent for accounts created through an OAuth provider
    #[serde(default, skip_serializing)]
    pub password_hash: Option<String>,

    /// Identifier at the OAuth provider, if any
    pub oauth_provider_id: Option<String>,

    /// Whether the email address has been verified
    pub is_verified: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a password-based user
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash: Some(password_hash),
            oauth_provider_id: None,
            is_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates a user that signs in through an OAuth provider only
    pub fn new_oauth(name: String, email: String, provider_id: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash: None,
            oauth_provider_id: Some(provider_id),
            is_verified: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether password sign-in is possible for this account
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Marks the user as verified
    pub fn verify(&mut self) {
        self.is_verified = true;
        self.updated_at = Utc::now();
    }

    /// Public view of the user, safe to return to clients
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            is_verified: self.is_verified,
        }
    }
}
