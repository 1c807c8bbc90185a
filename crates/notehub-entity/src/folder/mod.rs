//! Folder domain entities.

pub mod model;
pub mod tree;

pub use model::{Folder, FolderDetail, MAX_FOLDER_DEPTH, MAX_FOLDER_NAME_LEN, NewFolder};
pub use tree::{FolderNode, FolderTree};
