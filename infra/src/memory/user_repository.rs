//! In-memory user store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use rg_core::domain::entities::user::User;
use rg_core::errors::{AuthError, DomainError};
use rg_core::repositories::UserRepository;

#[derive(Default)]
struct Users {
    by_id: HashMap<Uuid, User>,
    /// email -> id
    by_email: HashMap<String, Uuid>,
}

/// User repository backed by a `HashMap`
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    inner: Arc<RwLock<Users>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Delete a user, returning it if it existed
    pub async fn remove(&self, id: Uuid) -> Option<User> {
        let mut users = self.inner.write().await;
        let user = users.by_id.remove(&id)?;
        users.by_email.remove(&user.email);
        Some(user)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.inner.read().await.by_id.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.inner.read().await;
        Ok(users
            .by_email
            .get(email)
            .and_then(|id| users.by_id.get(id))
            .cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.inner.write().await;
        if users.by_email.contains_key(&user.email) {
            return Err(AuthError::UserAlreadyExists.into());
        }
        users.by_email.insert(user.email.clone(), user.id);
        users.by_id.insert(user.id, user.clone());
        Ok(user)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.inner.read().await.by_email.contains_key(email))
    }
}
