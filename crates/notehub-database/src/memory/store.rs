//! In-memory store implementation using dashmap.
//!
//! Used for tests and for running the server without PostgreSQL. Records
//! keep an insertion sequence number so listings come back oldest first.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use notehub_core::error::AppError;
use notehub_core::result::AppResult;
use notehub_core::types::id::{FolderId, NoteId, UserId};
use notehub_entity::folder::{Folder, NewFolder};
use notehub_entity::note::{NewNote, Note, NoteContent};
use notehub_entity::user::{NewUser, User};

use crate::traits::{FolderStore, NoteStore, UserStore};

#[derive(Debug, Clone)]
struct Stored<T> {
    seq: u64,
    record: T,
}

/// Document store held entirely in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    folders: Arc<DashMap<FolderId, Stored<Folder>>>,
    notes: Arc<DashMap<NoteId, Stored<Note>>>,
    users: Arc<DashMap<UserId, User>>,
    usernames: Arc<DashMap<String, UserId>>,
    seq: Arc<AtomicU64>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed)
    }

    /// Remove every record.
    pub fn clear(&self) {
        self.folders.clear();
        self.notes.clear();
        self.users.clear();
        self.usernames.clear();
        debug!("Memory store cleared");
    }

    fn collect_folders(&self, filter: impl Fn(&Folder) -> bool) -> Vec<Folder> {
        let mut rows: Vec<(u64, Folder)> = self
            .folders
            .iter()
            .filter(|entry| filter(&entry.record))
            .map(|entry| (entry.seq, entry.record.clone()))
            .collect();
        rows.sort_by_key(|(seq, _)| *seq);
        rows.into_iter().map(|(_, folder)| folder).collect()
    }

    fn collect_notes(&self, filter: impl Fn(&Note) -> bool) -> Vec<Note> {
        let mut rows: Vec<(u64, Note)> = self
            .notes
            .iter()
            .filter(|entry| filter(&entry.record))
            .map(|entry| (entry.seq, entry.record.clone()))
            .collect();
        rows.sort_by_key(|(seq, _)| *seq);
        rows.into_iter().map(|(_, note)| note).collect()
    }

    fn modify_folder(
        &self,
        owner: UserId,
        id: FolderId,
        apply: impl FnOnce(&mut Folder),
    ) -> Option<Folder> {
        let mut entry = self.folders.get_mut(&id)?;
        if entry.record.owner_id != owner {
            return None;
        }
        apply(&mut entry.record);
        entry.record.updated_at = Utc::now();
        Some(entry.record.clone())
    }

    fn modify_note(&self, owner: UserId, id: NoteId, apply: impl FnOnce(&mut Note)) -> Option<Note> {
        let mut entry = self.notes.get_mut(&id)?;
        if entry.record.owner_id != owner {
            return None;
        }
        apply(&mut entry.record);
        Some(entry.record.clone())
    }
}

#[async_trait]
impl FolderStore for MemoryStore {
    async fn find_folder(&self, owner: UserId, id: FolderId) -> AppResult<Option<Folder>> {
        Ok(self
            .folders
            .get(&id)
            .filter(|entry| entry.record.owner_id == owner)
            .map(|entry| entry.record.clone()))
    }

    async fn list_folders(&self, owner: UserId) -> AppResult<Vec<Folder>> {
        Ok(self.collect_folders(|f| f.owner_id == owner))
    }

    async fn list_child_folders(&self, owner: UserId, parent: FolderId) -> AppResult<Vec<Folder>> {
        Ok(self.collect_folders(|f| f.owner_id == owner && f.parent_id == Some(parent)))
    }

    async fn insert_folder(&self, new: &NewFolder) -> AppResult<Folder> {
        let folder = Folder::from_new(new.clone());
        let seq = self.next_seq();
        self.folders.insert(
            folder.id,
            Stored {
                seq,
                record: folder.clone(),
            },
        );
        Ok(folder)
    }

    async fn update_folder(
        &self,
        owner: UserId,
        id: FolderId,
        name: &str,
        parent: Option<FolderId>,
    ) -> AppResult<Option<Folder>> {
        Ok(self.modify_folder(owner, id, |folder| {
            folder.name = name.to_string();
            folder.parent_id = parent;
        }))
    }

    async fn set_folder_parent(
        &self,
        owner: UserId,
        id: FolderId,
        parent: Option<FolderId>,
    ) -> AppResult<Option<Folder>> {
        Ok(self.modify_folder(owner, id, |folder| folder.parent_id = parent))
    }

    async fn delete_folder(&self, owner: UserId, id: FolderId) -> AppResult<bool> {
        Ok(self
            .folders
            .remove_if(&id, |_, entry| entry.record.owner_id == owner)
            .is_some())
    }

    async fn reparent_children(
        &self,
        owner: UserId,
        from: FolderId,
        to: Option<FolderId>,
    ) -> AppResult<u64> {
        let now = Utc::now();
        let mut changed = 0;
        for mut entry in self.folders.iter_mut() {
            let folder = &mut entry.record;
            if folder.owner_id == owner && folder.parent_id == Some(from) {
                folder.parent_id = to;
                folder.updated_at = now;
                changed += 1;
            }
        }
        Ok(changed)
    }

    async fn set_note_ids(
        &self,
        owner: UserId,
        id: FolderId,
        note_ids: &[NoteId],
    ) -> AppResult<bool> {
        Ok(self
            .modify_folder(owner, id, |folder| folder.note_ids = note_ids.to_vec())
            .is_some())
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn find_note(&self, owner: UserId, id: NoteId) -> AppResult<Option<Note>> {
        Ok(self
            .notes
            .get(&id)
            .filter(|entry| entry.record.owner_id == owner)
            .map(|entry| entry.record.clone()))
    }

    async fn list_notes(&self, owner: UserId) -> AppResult<Vec<Note>> {
        Ok(self.collect_notes(|n| n.owner_id == owner))
    }

    async fn find_notes_by_ids(&self, owner: UserId, ids: &[NoteId]) -> AppResult<Vec<Note>> {
        Ok(self.collect_notes(|n| n.owner_id == owner && ids.contains(&n.id)))
    }

    async fn list_note_ids_in_folder(
        &self,
        owner: UserId,
        folder: FolderId,
    ) -> AppResult<Vec<NoteId>> {
        Ok(self
            .collect_notes(|n| n.owner_id == owner && n.folder_id == Some(folder))
            .into_iter()
            .map(|n| n.id)
            .collect())
    }

    async fn insert_note(&self, new: &NewNote) -> AppResult<Note> {
        let note = Note::from_new(new.clone());
        let seq = self.next_seq();
        self.notes.insert(
            note.id,
            Stored {
                seq,
                record: note.clone(),
            },
        );
        Ok(note)
    }

    async fn update_note_content(
        &self,
        owner: UserId,
        id: NoteId,
        content: &NoteContent,
    ) -> AppResult<Option<Note>> {
        Ok(self.modify_note(owner, id, |note| note.apply_content(content)))
    }

    async fn set_note_folder(
        &self,
        owner: UserId,
        id: NoteId,
        folder: Option<FolderId>,
    ) -> AppResult<Option<Note>> {
        Ok(self.modify_note(owner, id, |note| {
            note.folder_id = folder;
            note.updated_at = Utc::now();
        }))
    }

    async fn delete_note(&self, owner: UserId, id: NoteId) -> AppResult<bool> {
        Ok(self
            .notes
            .remove_if(&id, |_, entry| entry.record.owner_id == owner)
            .is_some())
    }

    async fn reassign_notes(
        &self,
        owner: UserId,
        from: FolderId,
        to: Option<FolderId>,
    ) -> AppResult<u64> {
        let now = Utc::now();
        let mut changed = 0;
        for mut entry in self.notes.iter_mut() {
            let note = &mut entry.record;
            if note.owner_id == owner && note.folder_id == Some(from) {
                note.folder_id = to;
                note.updated_at = now;
                changed += 1;
            }
        }
        Ok(changed)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|entry| entry.clone()))
    }

    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let Some(id) = self.usernames.get(username).map(|entry| *entry) else {
            return Ok(None);
        };
        self.find_user(id).await
    }

    async fn insert_user(&self, new: &NewUser) -> AppResult<User> {
        let user = User::from_new(new.clone());
        match self.usernames.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict("Username already exists")),
            Entry::Vacant(slot) => {
                slot.insert(user.id);
                self.users.insert(user.id, user.clone());
                Ok(user)
            }
        }
    }

    async fn list_user_ids(&self) -> AppResult<Vec<UserId>> {
        let mut users: Vec<(chrono::DateTime<Utc>, UserId)> = self
            .users
            .iter()
            .map(|entry| (entry.created_at, entry.id))
            .collect();
        users.sort();
        Ok(users.into_iter().map(|(_, id)| id).collect())
    }
}
