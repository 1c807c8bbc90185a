//! User queries.

use async_trait::async_trait;

use notehub_core::error::{AppError, ErrorKind};
use notehub_core::result::AppResult;
use notehub_core::types::id::UserId;
use notehub_entity::user::{NewUser, User};

use super::PgStore;
use crate::traits::UserStore;

#[async_trait]
impl UserStore for PgStore {
    async fn find_user(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to find user", e))
    }

    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to find user by username", e)
            })
    }

    async fn insert_user(&self, new: &NewUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, username, password_hash) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(UserId::new())
        .bind(&new.username)
        .bind(&new.password_hash)
        .fetch_one(self.pool())
        .await
        .map_err(|e| {
            if matches!(&e, sqlx::Error::Database(db) if db.is_unique_violation()) {
                AppError::with_source(ErrorKind::Conflict, "Username already exists", e)
            } else {
                AppError::with_source(ErrorKind::Storage, "Failed to create user", e)
            }
        })
    }

    async fn list_user_ids(&self) -> AppResult<Vec<UserId>> {
        sqlx::query_scalar::<_, UserId>("SELECT id FROM users ORDER BY created_at ASC, id ASC")
            .fetch_all(self.pool())
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to list users", e))
    }
}
