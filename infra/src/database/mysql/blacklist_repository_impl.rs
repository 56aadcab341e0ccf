//! MySQL implementation of the TokenBlacklistRepository trait.
//!
//! `token_hash` is the primary key, so `INSERT IGNORE` is the atomic
//! insert-if-absent: exactly one of several concurrent inserts of the same
//! hash affects a row.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::MySqlPool;

use rg_core::domain::entities::token::BlacklistEntry;
use rg_core::errors::DomainError;
use rg_core::repositories::TokenBlacklistRepository;

use crate::InfrastructureError;

/// MySQL implementation of TokenBlacklistRepository
pub struct MySqlTokenBlacklistRepository {
    pool: MySqlPool,
}

impl MySqlTokenBlacklistRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenBlacklistRepository for MySqlTokenBlacklistRepository {
    async fn insert_if_absent(&self, entry: BlacklistEntry) -> Result<bool, DomainError> {
        let query = r#"
            INSERT IGNORE INTO token_blacklist (token_hash, expires_at, created_at)
            VALUES (?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(&entry.token_hash)
            .bind(entry.expires_at)
            .bind(entry.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert blacklist entry: {}", e);
                InfrastructureError::from(e)
            })?;

        Ok(result.rows_affected() == 1)
    }

    async fn contains(&self, token_hash: &str) -> Result<bool, DomainError> {
        let exists: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM token_blacklist WHERE token_hash = ?)")
                .bind(token_hash)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to query blacklist: {}", e);
                    InfrastructureError::from(e)
                })?;
        Ok(exists != 0)
    }

    async fn purge_expired(&self) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM token_blacklist WHERE expires_at <= ?")
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(InfrastructureError::from)?;

        Ok(result.rows_affected() as usize)
    }
}
