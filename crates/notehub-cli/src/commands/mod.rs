//! CLI command definitions and dispatch.

pub mod config;
pub mod folder;
pub mod migrate;
pub mod reconcile;
pub mod user;

use anyhow::Context;
use clap::{Parser, Subcommand};

use notehub_core::config::AppConfig;
use notehub_database::StoreManager;
use notehub_service::RequestContext;

use crate::output::OutputFormat;

/// NoteHub: notes organized in a shallow folder hierarchy
#[derive(Debug, Parser)]
#[command(name = "notehub", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// User management
    User(user::UserArgs),
    /// Folder inspection
    Folder(folder::FolderArgs),
    /// Folder note cache verification and repair
    Reconcile(reconcile::ReconcileArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> anyhow::Result<()> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &self.config).await,
            Commands::User(args) => user::execute(args, &self.config, self.format).await,
            Commands::Folder(args) => folder::execute(args, &self.config, self.format).await,
            Commands::Reconcile(args) => reconcile::execute(args, &self.config, self.format).await,
            Commands::Config(args) => config::execute(args, &self.config, self.format),
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> anyhow::Result<AppConfig> {
    AppConfig::load(config_path)
        .with_context(|| format!("Failed to load config from '{config_path}'"))
}

/// Helper: open the configured store
pub async fn open_store(config: &AppConfig) -> anyhow::Result<StoreManager> {
    StoreManager::open(&config.store)
        .await
        .with_context(|| format!("Failed to open '{}' store", config.store.provider))
}

/// Helper: act as the named user
pub async fn context_for(store: &StoreManager, username: &str) -> anyhow::Result<RequestContext> {
    let user = store
        .users()
        .find_user_by_username(username)
        .await?
        .with_context(|| format!("No user named '{username}'"))?;
    Ok(RequestContext::new(user.id, user.username))
}
