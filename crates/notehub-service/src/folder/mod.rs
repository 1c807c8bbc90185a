//! Folder hierarchy management, tree building, and the deletion cascade.

pub mod cascade;
pub mod hierarchy;
pub mod service;
pub mod tree;

pub use cascade::{CascadeCoordinator, CascadeReport};
pub use hierarchy::validate_placement;
pub use service::{FolderService, ParentChange};
pub use tree::TreeService;
