//! Placement rules for the folder hierarchy.
//!
//! A folder's level is the number of folders on the chain from it up to its
//! root, so a root folder is level 1. Placing a folder (together with its
//! subtree) under a parent is legal when the deepest folder of the subtree
//! stays within [`MAX_FOLDER_DEPTH`].

use notehub_core::error::AppError;
use notehub_core::result::AppResult;
use notehub_core::types::id::{FolderId, UserId};
use notehub_entity::folder::{Folder, MAX_FOLDER_DEPTH, MAX_FOLDER_NAME_LEN};

/// Normalizes and validates a folder name.
pub fn normalize_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Folder name is required."));
    }
    if name.chars().count() > MAX_FOLDER_NAME_LEN {
        return Err(AppError::validation(format!(
            "Folder name must not exceed {MAX_FOLDER_NAME_LEN} characters."
        )));
    }
    Ok(name.to_string())
}

/// Checks whether a subtree may be placed under a parent.
///
/// `ancestry` is the resolved chain starting at the proposed parent and
/// walking towards the root. `moving` is the folder being placed, or `None`
/// for a folder that does not exist yet. `subtree_height` is 1 for a folder
/// without children.
pub fn validate_placement(
    owner: UserId,
    moving: Option<FolderId>,
    subtree_height: usize,
    ancestry: &[Folder],
) -> AppResult<()> {
    // Stores scope lookups by owner, so this only fires for a store that
    // hands back another user's folder.
    if let Some(stranger) = ancestry.iter().find(|f| f.owner_id != owner) {
        return Err(AppError::ownership_violation(format!(
            "You cannot nest folders within a folder you do not own ({}).",
            stranger.id
        )));
    }

    if moving.is_some_and(|id| ancestry.iter().any(|f| f.id == id)) {
        return Err(AppError::cycle_detected(
            "A folder cannot be moved into itself or one of its descendants.",
        ));
    }

    if ancestry.len() + subtree_height > MAX_FOLDER_DEPTH {
        return Err(AppError::depth_exceeded(format!(
            "Maximum folder nesting level of {MAX_FOLDER_DEPTH} exceeded."
        )));
    }

    Ok(())
}
