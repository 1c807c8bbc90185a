//! PostgreSQL document store.

mod folder;
mod note;
mod user;

use notehub_core::config::DatabaseConfig;
use notehub_core::result::AppResult;
use sqlx::PgPool;

use crate::connection::DatabasePool;

/// Document store backed by PostgreSQL.
///
/// Folders keep their note cache in a `UUID[]` column; every query filters
/// on `owner_id`.
#[derive(Debug, Clone)]
pub struct PgStore {
    db: DatabasePool,
}

impl PgStore {
    /// Connect to PostgreSQL and run pending migrations if configured.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let db = DatabasePool::connect(config).await?;
        Ok(Self { db })
    }

    /// Wrap an existing pool.
    pub fn from_pool(db: DatabasePool) -> Self {
        Self { db }
    }

    pub(crate) fn pool(&self) -> &PgPool {
        self.db.pool()
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> AppResult<bool> {
        self.db.health_check().await
    }

    /// Close all pooled connections.
    pub async fn close(&self) {
        self.db.close().await;
    }
}
