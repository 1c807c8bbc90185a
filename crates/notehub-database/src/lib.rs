//! # notehub-database
//!
//! The document store capability used by the service layer, with two
//! providers behind it: PostgreSQL (sqlx) and an in-memory store (dashmap).
//! [`StoreManager`] selects the provider from configuration and owns the
//! store's lifecycle.

pub mod connection;
pub mod manager;
pub mod memory;
pub mod migration;
pub mod postgres;
pub mod traits;

pub use connection::DatabasePool;
pub use manager::StoreManager;
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use traits::{FolderStore, NoteStore, UserStore};
