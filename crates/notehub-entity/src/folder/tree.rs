//! Folder tree structures for hierarchical display.

use notehub_core::types::id::FolderId;
use serde::{Deserialize, Serialize};

/// A node in a folder tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderNode {
    /// Folder ID.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Level in the hierarchy (1 for roots).
    pub level: usize,
    /// Number of notes filed directly in this folder.
    pub note_count: usize,
    /// Child folder nodes.
    pub children: Vec<FolderNode>,
}

impl FolderNode {
    /// Height of the subtree rooted at this node (1 for a leaf).
    pub fn height(&self) -> usize {
        1 + self.children.iter().map(FolderNode::height).max().unwrap_or(0)
    }
}

/// A user's complete folder forest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderTree {
    /// The root folders, each with its descendants.
    pub roots: Vec<FolderNode>,
    /// Total number of folders in the tree.
    pub total_folders: usize,
}

impl FolderTree {
    /// Create an empty folder tree.
    pub fn empty() -> Self {
        Self {
            roots: Vec::new(),
            total_folders: 0,
        }
    }
}
