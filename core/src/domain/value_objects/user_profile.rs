//! Public projection of a user.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User fields that may be returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_verified: bool,
}
