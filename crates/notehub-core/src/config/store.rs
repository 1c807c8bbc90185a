//! Document store provider configuration.

use serde::{Deserialize, Serialize};

use super::database::DatabaseConfig;

/// Selects and configures the document store backing folders and notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store provider: `"postgres"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// PostgreSQL settings (ignored by the memory provider).
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl StoreConfig {
    /// A configuration selecting the in-memory provider.
    pub fn memory() -> Self {
        Self {
            provider: "memory".to_string(),
            database: DatabaseConfig::default(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            database: DatabaseConfig::default(),
        }
    }
}

fn default_provider() -> String {
    "postgres".to_string()
}
