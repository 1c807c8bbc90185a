//! Deletion cascade: relinks a deleted folder's children and notes.
//!
//! The steps run in a fixed order and each is a single-call store update,
//! so an interrupted cascade leaves records that the reconciliation pass
//! can repair.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use notehub_core::error::AppError;
use notehub_core::result::AppResult;
use notehub_core::types::id::{FolderId, UserId};
use notehub_database::traits::{FolderStore, NoteStore};

use crate::note::FolderNoteIndex;

/// Outcome of a folder deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeReport {
    /// The folder that was deleted.
    pub folder_id: FolderId,
    /// Where its children and notes went (None = top level / unfiled).
    pub new_parent_id: Option<FolderId>,
    /// Number of direct child folders reparented.
    pub reparented_folders: u64,
    /// Number of notes relinked.
    pub relinked_notes: u64,
}

/// Coordinates the multi-record folder deletion.
#[derive(Clone)]
pub struct CascadeCoordinator {
    folders: Arc<dyn FolderStore>,
    notes: Arc<dyn NoteStore>,
    index: FolderNoteIndex,
}

impl std::fmt::Debug for CascadeCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CascadeCoordinator").finish_non_exhaustive()
    }
}

impl CascadeCoordinator {
    /// Creates a new cascade coordinator.
    pub fn new(
        folders: Arc<dyn FolderStore>,
        notes: Arc<dyn NoteStore>,
        index: FolderNoteIndex,
    ) -> Self {
        Self {
            folders,
            notes,
            index,
        }
    }

    /// Deletes a folder and promotes its direct children and notes to the
    /// deleted folder's parent. Grandchildren keep their parent.
    pub async fn delete_folder(&self, owner: UserId, folder_id: FolderId) -> AppResult<CascadeReport> {
        let folder = self
            .folders
            .find_folder(owner, folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;
        let new_parent_id = folder.parent_id;

        if !self.folders.delete_folder(owner, folder_id).await? {
            return Err(AppError::not_found("Folder not found"));
        }

        let reparented_folders = self
            .folders
            .reparent_children(owner, folder_id, new_parent_id)
            .await?;
        let relinked_notes = self
            .notes
            .reassign_notes(owner, folder_id, new_parent_id)
            .await?;
        self.index.sync_opt(owner, new_parent_id).await?;

        let report = CascadeReport {
            folder_id,
            new_parent_id,
            reparented_folders,
            relinked_notes,
        };

        info!(
            user_id = %owner,
            folder_id = %folder_id,
            new_parent_id = ?new_parent_id,
            reparented_folders,
            relinked_notes,
            "Folder deleted"
        );

        Ok(report)
    }
}
