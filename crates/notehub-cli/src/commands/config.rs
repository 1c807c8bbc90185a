//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use notehub_database::connection::mask_password;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration (secrets masked)
    Show,
    /// Validate the configuration file
    Validate,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config_path: &str, format: OutputFormat) -> anyhow::Result<()> {
    let mut config = super::load_config(config_path)?;

    match &args.command {
        ConfigCommand::Show => {
            config.auth.jwt_secret = "****".to_string();
            config.store.database.url = mask_password(&config.store.database.url);
            match format {
                OutputFormat::Json => output::print_json(&config),
                OutputFormat::Table => println!("{config:#?}"),
            }
        }
        ConfigCommand::Validate => {
            output::print_success(&format!("Configuration '{config_path}' is valid"));
            output::print_kv("Server", &config.server.bind_address());
            output::print_kv("Store", &config.store.provider);
            if config.store.provider == "postgres" {
                output::print_kv("Database", &mask_password(&config.store.database.url));
            }
            output::print_kv("Log level", &config.logging.level);
            if config.auth.uses_placeholder_secret() {
                output::print_warning("auth.jwt_secret is still the shipped placeholder");
            }
        }
    }

    Ok(())
}
