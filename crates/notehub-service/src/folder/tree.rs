//! Folder tree building.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use notehub_core::result::AppResult;
use notehub_core::types::id::FolderId;
use notehub_database::traits::FolderStore;
use notehub_entity::folder::{Folder, FolderNode, FolderTree};

use crate::context::RequestContext;

/// Builds nested folder trees.
#[derive(Clone)]
pub struct TreeService {
    /// Folder collection.
    folders: Arc<dyn FolderStore>,
}

impl std::fmt::Debug for TreeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeService").finish_non_exhaustive()
    }
}

impl TreeService {
    /// Creates a new tree service.
    pub fn new(folders: Arc<dyn FolderStore>) -> Self {
        Self { folders }
    }

    /// Builds the current user's complete folder forest.
    pub async fn get_tree(&self, ctx: &RequestContext) -> AppResult<FolderTree> {
        let folders = self.folders.list_folders(ctx.user_id).await?;
        Ok(build_tree(&folders))
    }
}

/// Builds a forest from a flat list of one user's folders.
///
/// A folder whose parent is missing from the list is treated as a root.
pub fn build_tree(folders: &[Folder]) -> FolderTree {
    if folders.is_empty() {
        return FolderTree::empty();
    }

    let known: HashSet<FolderId> = folders.iter().map(|f| f.id).collect();
    let mut children: HashMap<FolderId, Vec<&Folder>> = HashMap::new();
    let mut roots = Vec::new();
    for folder in folders {
        match folder.parent_id {
            Some(parent) if known.contains(&parent) => {
                children.entry(parent).or_default().push(folder)
            }
            _ => roots.push(folder),
        }
    }

    let mut visited = HashSet::new();
    let roots: Vec<FolderNode> = roots
        .into_iter()
        .map(|root| build_node(root, 1, &children, &mut visited))
        .collect();

    FolderTree {
        roots,
        total_folders: visited.len(),
    }
}

fn build_node(
    folder: &Folder,
    level: usize,
    children: &HashMap<FolderId, Vec<&Folder>>,
    visited: &mut HashSet<FolderId>,
) -> FolderNode {
    visited.insert(folder.id);
    let mut nodes = Vec::new();
    for child in children.get(&folder.id).into_iter().flatten() {
        if !visited.contains(&child.id) {
            nodes.push(build_node(child, level + 1, children, visited));
        }
    }

    FolderNode {
        id: folder.id,
        name: folder.name.clone(),
        level,
        note_count: folder.note_ids.len(),
        children: nodes,
    }
}
