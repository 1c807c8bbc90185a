//! User management CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use notehub_auth::jwt::{JwtDecoder, JwtEncoder};
use notehub_auth::password::{PasswordHasher, PasswordValidator};
use notehub_core::config::AppConfig;
use notehub_database::StoreManager;
use notehub_entity::user::User;
use notehub_service::AuthService;

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List all users
    List,
    /// Register a new user
    Create {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Username
    username: String,
    /// Created at
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            created_at: user.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config_path: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let store = super::open_store(&config).await?;

    let result = run(&args.command, &config, &store, format).await;
    store.close().await;
    result
}

async fn run(
    command: &UserCommand,
    config: &AppConfig,
    store: &StoreManager,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match command {
        UserCommand::List => list_users(store, format).await,
        UserCommand::Create { username, password } => {
            let user = auth_service(config, store)
                .register(username, password)
                .await?;
            output::print_success(&format!("User '{}' created ({})", user.username, user.id));
            Ok(())
        }
    }
}

async fn list_users(store: &StoreManager, format: OutputFormat) -> anyhow::Result<()> {
    let users = store.users();
    let mut rows = Vec::new();
    for id in users.list_user_ids().await? {
        if let Some(user) = users.find_user(id).await? {
            rows.push(UserRow::from(&user));
        }
    }
    output::print_list(&rows, format);
    Ok(())
}

fn auth_service(config: &AppConfig, store: &StoreManager) -> AuthService {
    AuthService::new(
        store.users(),
        Arc::new(PasswordHasher::new()),
        Arc::new(PasswordValidator::new(&config.auth)),
        Arc::new(JwtEncoder::new(&config.auth)),
        Arc::new(JwtDecoder::new(&config.auth)),
    )
}
