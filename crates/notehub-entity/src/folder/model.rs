//! Folder entity model.

use chrono::{DateTime, Utc};
use notehub_core::types::id::{FolderId, NoteId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::note::Note;

/// Maximum length of a folder name, in characters.
pub const MAX_FOLDER_NAME_LEN: usize = 50;

/// Maximum nesting level of the folder hierarchy. A root folder is level 1.
pub const MAX_FOLDER_DEPTH: usize = 3;

/// A folder in a user's note hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// The owning user.
    pub owner_id: UserId,
    /// Parent folder ID (null for root folders).
    #[serde(rename = "parentFolder")]
    pub parent_id: Option<FolderId>,
    /// Cached ids of the notes filed here. Derived from `Note::folder_id`.
    pub note_ids: Vec<NoteId>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this is a root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Build a fresh folder record with an empty note cache.
    pub fn from_new(new: NewFolder) -> Self {
        let now = Utc::now();
        Self {
            id: FolderId::new(),
            name: new.name,
            owner_id: new.owner_id,
            parent_id: new.parent_id,
            note_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone)]
pub struct NewFolder {
    /// Folder name, already trimmed and validated.
    pub name: String,
    /// The owning user.
    pub owner_id: UserId,
    /// Parent folder (None for root).
    pub parent_id: Option<FolderId>,
}

/// A folder together with its member notes resolved from the cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderDetail {
    /// The folder record.
    #[serde(flatten)]
    pub folder: Folder,
    /// Notes whose ids appear in the folder's cache.
    pub notes: Vec<Note>,
}
