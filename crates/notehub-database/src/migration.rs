//! Schema migrations for the PostgreSQL store.
//!
//! The schema holds three tables: `users`, `folders` (carrying the
//! `note_ids` cache column) and `notes`. Scripts live in the workspace
//! `migrations/` directory and are embedded at compile time.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use notehub_core::error::{AppError, ErrorKind};

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Bring the NoteHub schema up to date. Already-applied scripts are skipped.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    let known = MIGRATOR.iter().count();
    info!(known, "Applying NoteHub schema migrations");

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Storage,
            format!("NoteHub schema migration failed: {e}"),
            e,
        )
    })?;

    info!("NoteHub schema is up to date");
    Ok(())
}
