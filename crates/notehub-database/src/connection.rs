//! Connection pool behind the PostgreSQL store.
//!
//! The CLI uses the pool directly for migrations; the server reaches it
//! through [`crate::PgStore`].

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use notehub_core::config::DatabaseConfig;
use notehub_core::error::{AppError, ErrorKind};

/// Pooled PostgreSQL connections for the NoteHub store.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Open the pool and, when `run_migrations` is set, bring the schema
    /// up to date before handing it out.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        info!(
            url = %mask_password(&config.url),
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "Opening NoteHub store pool"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Cannot reach the NoteHub store: {e}"),
                    e,
                )
            })?;

        info!("NoteHub store pool ready");

        let db = Self { pool };
        if config.run_migrations {
            crate::migration::run_migrations(&db.pool).await?;
        }
        Ok(db)
    }

    /// The sqlx pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round-trips a trivial query.
    pub async fn health_check(&self) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Store health check failed", e))
    }

    /// Waits for checked-out connections and closes the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("NoteHub store pool closed");
    }
}

/// Replaces the password in a connection URL with `****` so the URL can
/// be logged or printed.
pub fn mask_password(url: &str) -> String {
    let (scheme, rest) = url.split_once("://").unwrap_or(("", url));
    let Some((credentials, host)) = rest.rsplit_once('@') else {
        return url.to_string();
    };
    let Some((user, _)) = credentials.split_once(':') else {
        return url.to_string();
    };
    let prefix = if scheme.is_empty() {
        String::new()
    } else {
        format!("{scheme}://")
    };
    format!("{prefix}{user}:****@{host}")
}
