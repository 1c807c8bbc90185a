//! The folder note-id cache, maintained as a derived index.
//!
//! `Note::folder_id` is the source of truth. A folder's `note_ids` is only
//! ever rewritten wholesale from a query over the notes collection, so every
//! sync is idempotent and repairs any earlier drift.

use std::sync::Arc;

use tracing::debug;

use notehub_core::result::AppResult;
use notehub_core::types::id::{FolderId, NoteId, UserId};
use notehub_database::traits::{FolderStore, NoteStore};

/// Rebuilds folder note caches from the notes collection.
#[derive(Clone)]
pub struct FolderNoteIndex {
    folders: Arc<dyn FolderStore>,
    notes: Arc<dyn NoteStore>,
}

impl std::fmt::Debug for FolderNoteIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FolderNoteIndex").finish_non_exhaustive()
    }
}

impl FolderNoteIndex {
    /// Creates a new index over the given collections.
    pub fn new(folders: Arc<dyn FolderStore>, notes: Arc<dyn NoteStore>) -> Self {
        Self { folders, notes }
    }

    /// Re-derives one folder's cache. Returns the ids written.
    ///
    /// A folder that no longer exists is left alone.
    pub async fn sync(&self, owner: UserId, folder_id: FolderId) -> AppResult<Vec<NoteId>> {
        let ids = self.notes.list_note_ids_in_folder(owner, folder_id).await?;
        let found = self.folders.set_note_ids(owner, folder_id, &ids).await?;
        debug!(
            user_id = %owner,
            folder_id = %folder_id,
            notes = ids.len(),
            found,
            "Folder note cache rebuilt"
        );
        Ok(ids)
    }

    /// Re-derives the cache of `folder_id` if it is set.
    pub async fn sync_opt(&self, owner: UserId, folder_id: Option<FolderId>) -> AppResult<()> {
        if let Some(folder_id) = folder_id {
            self.sync(owner, folder_id).await?;
        }
        Ok(())
    }
}
