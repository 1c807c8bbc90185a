//! Database migration management commands.

use anyhow::Context;
use clap::{Args, Subcommand};

use notehub_database::DatabasePool;
use notehub_database::connection::mask_password;

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config_path: &str) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    match &args.command {
        MigrateCommand::Run => {
            if config.store.provider != "postgres" {
                output::print_warning(&format!(
                    "Store provider '{}' has no schema to migrate.",
                    config.store.provider
                ));
                return Ok(());
            }

            let database = &config.store.database;
            println!("Running migrations on {}...", mask_password(&database.url));
            let pool = DatabasePool::connect(database).await?;
            notehub_database::migration::run_migrations(pool.pool())
                .await
                .context("Migration failed")?;
            pool.close().await;
            output::print_success("All migrations applied successfully.");
        }
    }

    Ok(())
}
