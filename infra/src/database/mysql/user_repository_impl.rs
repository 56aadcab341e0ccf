//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use rg_core::domain::entities::user::User;
use rg_core::errors::{AuthError, DomainError};
use rg_core::repositories::UserRepository;

use crate::InfrastructureError;

const USER_COLUMNS: &str = "id, name, email, password_hash, oauth_provider_id, \
                            is_verified, created_at, updated_at";

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, InfrastructureError> {
        let id: String = row.try_get("id")?;

        Ok(User {
            id: Uuid::parse_str(&id)
                .map_err(|e| InfrastructureError::Mapping(format!("Invalid user UUID: {}", e)))?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            oauth_provider_id: row.try_get("oauth_provider_id")?,
            is_verified: row.try_get("is_verified")?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
            updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
        })
    }

    async fn fetch_one_by(&self, column: &str, value: String) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT {} FROM users WHERE {} = ? LIMIT 1",
            USER_COLUMNS, column
        );

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(InfrastructureError::from)?;

        match row {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.fetch_one_by("id", id.to_string()).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.fetch_one_by("email", email.to_string()).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, name, email, password_hash, oauth_provider_id,
                is_verified, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.oauth_provider_id)
            .bind(user.is_verified)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => {
                tracing::debug!(user_id = %user.id, "Inserted user");
                Ok(user)
            }
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(AuthError::UserAlreadyExists.into())
            }
            Err(e) => {
                tracing::error!("Failed to insert user: {}", e);
                Err(InfrastructureError::from(e).into())
            }
        }
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let exists: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(InfrastructureError::from)?;
        Ok(exists != 0)
    }
}
