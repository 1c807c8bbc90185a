//! Store capability traits.
//!
//! Every folder and note operation is scoped by the owning user: a record
//! belonging to another user behaves exactly like a missing one. Each call
//! is atomic on its own; multi-record sequences are ordered by the service
//! layer.

use async_trait::async_trait;

use notehub_core::result::AppResult;
use notehub_core::types::id::{FolderId, NoteId, UserId};
use notehub_entity::folder::{Folder, NewFolder};
use notehub_entity::note::{NewNote, Note, NoteContent};
use notehub_entity::user::{NewUser, User};

/// Persistence operations on the folder collection.
#[async_trait]
pub trait FolderStore: Send + Sync {
    /// Find a folder owned by `owner`.
    async fn find_folder(&self, owner: UserId, id: FolderId) -> AppResult<Option<Folder>>;

    /// List every folder owned by `owner`, oldest first.
    async fn list_folders(&self, owner: UserId) -> AppResult<Vec<Folder>>;

    /// List the direct children of `parent`.
    async fn list_child_folders(&self, owner: UserId, parent: FolderId) -> AppResult<Vec<Folder>>;

    /// Insert a new folder with an empty note cache.
    async fn insert_folder(&self, new: &NewFolder) -> AppResult<Folder>;

    /// Rename and reparent a folder. Returns `None` if it does not exist.
    async fn update_folder(
        &self,
        owner: UserId,
        id: FolderId,
        name: &str,
        parent: Option<FolderId>,
    ) -> AppResult<Option<Folder>>;

    /// Reparent a folder without renaming it.
    async fn set_folder_parent(
        &self,
        owner: UserId,
        id: FolderId,
        parent: Option<FolderId>,
    ) -> AppResult<Option<Folder>>;

    /// Delete a folder record. Returns whether a record was removed.
    async fn delete_folder(&self, owner: UserId, id: FolderId) -> AppResult<bool>;

    /// Point every child of `from` at `to`. Returns the number of folders changed.
    async fn reparent_children(
        &self,
        owner: UserId,
        from: FolderId,
        to: Option<FolderId>,
    ) -> AppResult<u64>;

    /// Overwrite a folder's note cache. Returns whether the folder exists.
    async fn set_note_ids(&self, owner: UserId, id: FolderId, note_ids: &[NoteId])
    -> AppResult<bool>;
}

/// Persistence operations on the note collection.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Find a note owned by `owner`.
    async fn find_note(&self, owner: UserId, id: NoteId) -> AppResult<Option<Note>>;

    /// List every note owned by `owner`, oldest first.
    async fn list_notes(&self, owner: UserId) -> AppResult<Vec<Note>>;

    /// Fetch the notes among `ids` that exist and belong to `owner`.
    async fn find_notes_by_ids(&self, owner: UserId, ids: &[NoteId]) -> AppResult<Vec<Note>>;

    /// Ids of the notes whose folder reference is `folder`, oldest first.
    async fn list_note_ids_in_folder(&self, owner: UserId, folder: FolderId)
    -> AppResult<Vec<NoteId>>;

    /// Insert a new note.
    async fn insert_note(&self, new: &NewNote) -> AppResult<Note>;

    /// Replace the content fields of a note.
    async fn update_note_content(
        &self,
        owner: UserId,
        id: NoteId,
        content: &NoteContent,
    ) -> AppResult<Option<Note>>;

    /// Set a note's folder reference.
    async fn set_note_folder(
        &self,
        owner: UserId,
        id: NoteId,
        folder: Option<FolderId>,
    ) -> AppResult<Option<Note>>;

    /// Delete a note. Returns whether a record was removed.
    async fn delete_note(&self, owner: UserId, id: NoteId) -> AppResult<bool>;

    /// Move every note filed in `from` to `to`. Returns the number of notes changed.
    async fn reassign_notes(
        &self,
        owner: UserId,
        from: FolderId,
        to: Option<FolderId>,
    ) -> AppResult<u64>;
}

/// Persistence operations on user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by id.
    async fn find_user(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find a user by login name.
    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Insert a user. Fails with `Conflict` if the username is taken.
    async fn insert_user(&self, new: &NewUser) -> AppResult<User>;

    /// Ids of every registered user.
    async fn list_user_ids(&self) -> AppResult<Vec<UserId>>;
}
