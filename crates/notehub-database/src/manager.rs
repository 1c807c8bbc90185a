//! Store manager that dispatches to the configured provider.

use std::fmt;
use std::sync::Arc;

use tracing::info;

use notehub_core::config::StoreConfig;
use notehub_core::error::AppError;
use notehub_core::result::AppResult;

use crate::memory::MemoryStore;
use crate::postgres::PgStore;
use crate::traits::{FolderStore, NoteStore, UserStore};

#[derive(Clone)]
enum Backend {
    Postgres(PgStore),
    Memory(MemoryStore),
}

/// The injected document store handle.
///
/// The provider is selected once at construction time from configuration.
/// Services receive the per-collection capabilities through [`folders`],
/// [`notes`], and [`users`]; the manager itself owns open/close.
///
/// [`folders`]: StoreManager::folders
/// [`notes`]: StoreManager::notes
/// [`users`]: StoreManager::users
#[derive(Clone)]
pub struct StoreManager {
    backend: Backend,
    folders: Arc<dyn FolderStore>,
    notes: Arc<dyn NoteStore>,
    users: Arc<dyn UserStore>,
}

impl StoreManager {
    /// Open the store named by `config.provider`.
    pub async fn open(config: &StoreConfig) -> AppResult<Self> {
        match config.provider.as_str() {
            "postgres" => {
                info!("Initializing PostgreSQL store");
                let store = PgStore::connect(&config.database).await?;
                Ok(Self::from_postgres(store))
            }
            "memory" => {
                info!("Initializing in-memory store");
                Ok(Self::from_memory(MemoryStore::new()))
            }
            other => Err(AppError::configuration(format!(
                "Unknown store provider: '{other}'. Supported: postgres, memory"
            ))),
        }
    }

    /// Create a manager over a fresh in-memory store (for testing).
    pub fn memory() -> Self {
        Self::from_memory(MemoryStore::new())
    }

    /// Create a manager over an existing in-memory store.
    pub fn from_memory(store: MemoryStore) -> Self {
        let shared = Arc::new(store.clone());
        Self {
            backend: Backend::Memory(store),
            folders: shared.clone(),
            notes: shared.clone(),
            users: shared,
        }
    }

    /// Create a manager over an existing PostgreSQL store.
    pub fn from_postgres(store: PgStore) -> Self {
        let shared = Arc::new(store.clone());
        Self {
            backend: Backend::Postgres(store),
            folders: shared.clone(),
            notes: shared.clone(),
            users: shared,
        }
    }

    /// Name of the active provider.
    pub fn provider(&self) -> &'static str {
        match self.backend {
            Backend::Postgres(_) => "postgres",
            Backend::Memory(_) => "memory",
        }
    }

    /// The folder collection.
    pub fn folders(&self) -> Arc<dyn FolderStore> {
        Arc::clone(&self.folders)
    }

    /// The note collection.
    pub fn notes(&self) -> Arc<dyn NoteStore> {
        Arc::clone(&self.notes)
    }

    /// The user collection.
    pub fn users(&self) -> Arc<dyn UserStore> {
        Arc::clone(&self.users)
    }

    /// The PostgreSQL store, if that is the active provider.
    pub fn postgres(&self) -> Option<&PgStore> {
        match &self.backend {
            Backend::Postgres(store) => Some(store),
            Backend::Memory(_) => None,
        }
    }

    /// Check that the store is reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.backend {
            Backend::Postgres(store) => store.health_check().await,
            Backend::Memory(_) => Ok(true),
        }
    }

    /// Release the store's resources.
    pub async fn close(&self) {
        match &self.backend {
            Backend::Postgres(store) => store.close().await,
            Backend::Memory(_) => {}
        }
        info!(provider = self.provider(), "Store closed");
    }
}

impl fmt::Debug for StoreManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreManager")
            .field("provider", &self.provider())
            .finish()
    }
}
