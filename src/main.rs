//! NoteHub Server: notes organized in a shallow folder hierarchy.
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use notehub_core::config::AppConfig;
use notehub_core::error::AppError;
use notehub_database::StoreManager;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from the base file, the environment overlay, and
/// `NOTEHUB__*` variables.
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("NOTEHUB_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
    let env = std::env::var("NOTEHUB_ENV").unwrap_or_else(|_| "development".to_string());
    let overlay = format!("config/{env}.toml");

    AppConfig::load_layered(&config_path, Some(&overlay))
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        store = %config.store.provider,
        "Starting NoteHub"
    );

    if config.auth.uses_placeholder_secret() {
        tracing::warn!("auth.jwt_secret is the shipped placeholder; set NOTEHUB__AUTH__JWT_SECRET");
    }

    let store = StoreManager::open(&config.store).await?;
    let result = notehub_api::run_server(config, store.clone()).await;
    store.close().await;
    result
}
