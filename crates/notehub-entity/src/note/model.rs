//! Note entity model.

use chrono::{DateTime, Utc};
use notehub_core::types::id::{FolderId, NoteId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Maximum length of a note title, in characters.
pub const MAX_NOTE_TITLE_LEN: usize = 100;

/// Maximum length of the key points field, in characters.
pub const MAX_KEY_POINTS_LEN: usize = 300;

/// Maximum length of the summary field, in characters.
pub const MAX_SUMMARY_LEN: usize = 300;

/// A note owned by a single user, optionally filed in a folder.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique note identifier.
    pub id: NoteId,
    /// Note title.
    pub title: String,
    /// Short bullet-style key points.
    pub key_points: String,
    /// Free-form body.
    pub detailed_notes: String,
    /// Summary paragraph.
    pub summary: String,
    /// The owning user.
    pub owner_id: UserId,
    /// The folder this note is filed in (null = unfiled).
    pub folder_id: Option<FolderId>,
    /// When the note was created.
    pub created_at: DateTime<Utc>,
    /// When the note was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Build a fresh note record from creation data.
    pub fn from_new(new: NewNote) -> Self {
        let now = Utc::now();
        Self {
            id: NoteId::new(),
            title: new.content.title,
            key_points: new.content.key_points,
            detailed_notes: new.content.detailed_notes,
            summary: new.content.summary,
            owner_id: new.owner_id,
            folder_id: new.folder_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the editable content fields.
    pub fn apply_content(&mut self, content: &NoteContent) {
        self.title = content.title.clone();
        self.key_points = content.key_points.clone();
        self.detailed_notes = content.detailed_notes.clone();
        self.summary = content.summary.clone();
        self.updated_at = Utc::now();
    }
}

/// The editable text of a note.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteContent {
    /// Note title, already trimmed.
    pub title: String,
    /// Key points.
    pub key_points: String,
    /// Detailed notes.
    pub detailed_notes: String,
    /// Summary.
    pub summary: String,
}

/// Data required to create a new note.
#[derive(Debug, Clone)]
pub struct NewNote {
    /// The owning user.
    pub owner_id: UserId,
    /// Initial content.
    pub content: NoteContent,
    /// Folder to file the note in, if any.
    pub folder_id: Option<FolderId>,
}
