//! Request DTOs with validation.

use serde::{Deserialize, Deserializer};
use validator::Validate;

use notehub_core::types::id::FolderId;
use notehub_entity::folder::MAX_FOLDER_NAME_LEN;
use notehub_entity::note::{MAX_KEY_POINTS_LEN, MAX_NOTE_TITLE_LEN, MAX_SUMMARY_LEN, NoteContent};
use notehub_entity::user::MAX_USERNAME_LEN;
use notehub_service::ParentChange;

// `validator` compares lengths as u64.
const USERNAME_MAX: u64 = MAX_USERNAME_LEN as u64;
const FOLDER_NAME_MAX: u64 = MAX_FOLDER_NAME_LEN as u64;
const NOTE_TITLE_MAX: u64 = MAX_NOTE_TITLE_LEN as u64;
const KEY_POINTS_MAX: u64 = MAX_KEY_POINTS_LEN as u64;
const SUMMARY_MAX: u64 = MAX_SUMMARY_LEN as u64;

/// Registration request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username.
    #[validate(length(
        max = USERNAME_MAX,
        message = "Username must not exceed 30 characters."
    ))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required."))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    /// Refresh token.
    #[validate(length(min = 1, message = "No refresh token provided."))]
    pub refresh_token: String,
}

/// Create folder request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(
        max = FOLDER_NAME_MAX,
        message = "Folder name must not exceed 50 characters."
    ))]
    pub name: String,
    /// Parent folder; absent or null for a top-level folder.
    #[serde(default)]
    pub parent_folder: Option<FolderId>,
}

/// Update folder request.
///
/// An absent `parentFolder` keeps the current parent; an explicit `null`
/// moves the folder to the top level.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFolderRequest {
    /// Folder name.
    #[validate(length(
        max = FOLDER_NAME_MAX,
        message = "Folder name must not exceed 50 characters."
    ))]
    pub name: String,
    /// Parent change.
    #[serde(default, deserialize_with = "present")]
    pub parent_folder: Option<Option<FolderId>>,
}

impl UpdateFolderRequest {
    /// The requested parent change.
    pub fn parent_change(&self) -> ParentChange {
        match self.parent_folder {
            None => ParentChange::Keep,
            Some(parent) => ParentChange::to(parent),
        }
    }
}

/// Move folder request.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MoveFolderRequest {
    /// New parent; absent or null moves the folder to the top level.
    #[serde(default)]
    pub new_parent_id: Option<FolderId>,
}

/// Create or update note request.
///
/// `folderId` is honoured on create only; moves go through
/// [`MoveNoteRequest`].
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NoteRequest {
    /// Title.
    #[validate(length(
        max = NOTE_TITLE_MAX,
        message = "Note title must not exceed 100 characters."
    ))]
    pub title: String,
    /// Key points.
    #[serde(default)]
    #[validate(length(
        max = KEY_POINTS_MAX,
        message = "Key points must not exceed 300 characters."
    ))]
    pub key_points: String,
    /// Detailed notes.
    #[serde(default)]
    pub detailed_notes: String,
    /// Summary.
    #[serde(default)]
    #[validate(length(
        max = SUMMARY_MAX,
        message = "Summary must not exceed 300 characters."
    ))]
    pub summary: String,
    /// Folder to file the note in.
    #[serde(default)]
    pub folder_id: Option<FolderId>,
}

impl NoteRequest {
    /// The content fields of the note.
    pub fn content(&self) -> NoteContent {
        NoteContent {
            title: self.title.clone(),
            key_points: self.key_points.clone(),
            detailed_notes: self.detailed_notes.clone(),
            summary: self.summary.clone(),
        }
    }
}

/// Move note request.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MoveNoteRequest {
    /// Target folder; absent or null unfiles the note.
    #[serde(default)]
    pub new_folder_id: Option<FolderId>,
}

/// Marks a field as present even when its value is `null`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
