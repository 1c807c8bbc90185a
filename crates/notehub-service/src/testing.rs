//! Shared fixtures for service tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use notehub_core::error::AppError;
use notehub_core::result::AppResult;
use notehub_core::types::id::{FolderId, NoteId, UserId};
use notehub_database::traits::{FolderStore, NoteStore};
use notehub_database::{MemoryStore, StoreManager};
use notehub_entity::folder::{Folder, MAX_FOLDER_DEPTH, NewFolder};
use notehub_entity::note::{NewNote, Note, NoteContent};

use crate::context::RequestContext;
use crate::folder::{CascadeCoordinator, FolderService, TreeService};
use crate::note::{FolderNoteIndex, NoteService};
use crate::reconcile::ReconcileService;

pub(crate) fn content(title: &str) -> NoteContent {
    NoteContent {
        title: title.to_string(),
        ..NoteContent::default()
    }
}

/// Every service wired to one in-memory store, acting as one user.
pub(crate) struct Harness {
    pub store: StoreManager,
    pub ctx: RequestContext,
    pub folders: FolderService,
    pub notes: NoteService,
    pub cascade: CascadeCoordinator,
    pub tree: TreeService,
    pub reconcile: ReconcileService,
}

impl Harness {
    pub fn new() -> Self {
        Self::build(StoreManager::memory(), UserId::new())
    }

    /// Services running on a [`FaultyStore`]. `store` reads the same records
    /// without faults.
    pub fn faulty() -> (Self, Arc<FaultyStore>) {
        let memory = MemoryStore::new();
        let faulty = Arc::new(FaultyStore::new(memory.clone()));
        let harness = Self::wire(
            StoreManager::from_memory(memory),
            faulty.clone(),
            faulty.clone(),
            UserId::new(),
        );
        (harness, faulty)
    }

    /// A second user on the same store.
    pub fn sharing(other: &Harness) -> Self {
        Self::build(other.store.clone(), UserId::new())
    }

    /// A specific user on the same store.
    pub fn for_user(other: &Harness, user_id: UserId) -> Self {
        Self::build(other.store.clone(), user_id)
    }

    fn build(store: StoreManager, user_id: UserId) -> Self {
        let (folders, notes) = (store.folders(), store.notes());
        Self::wire(store, folders, notes, user_id)
    }

    fn wire(
        store: StoreManager,
        folders: Arc<dyn FolderStore>,
        notes: Arc<dyn NoteStore>,
        user_id: UserId,
    ) -> Self {
        let index = FolderNoteIndex::new(folders.clone(), notes.clone());
        let cascade = CascadeCoordinator::new(folders.clone(), notes.clone(), index.clone());
        Self {
            ctx: RequestContext::new(user_id, "tester"),
            folders: FolderService::new(folders.clone(), notes.clone(), Arc::new(cascade.clone())),
            notes: NoteService::new(notes.clone(), folders.clone(), index.clone()),
            tree: TreeService::new(folders.clone()),
            reconcile: ReconcileService::new(folders, notes, store.users(), index),
            cascade,
            store,
        }
    }

    pub async fn folder(&self, name: &str, parent: Option<FolderId>) -> Folder {
        self.folders
            .create_folder(&self.ctx, name, parent)
            .await
            .expect("create folder")
    }

    pub async fn note(&self, title: &str, folder: Option<FolderId>) -> Note {
        self.notes
            .create_note(&self.ctx, content(title), folder)
            .await
            .expect("create note")
    }

    pub async fn find_folder(&self, id: FolderId) -> Option<Folder> {
        self.store
            .folders()
            .find_folder(self.ctx.user_id, id)
            .await
            .expect("find folder")
    }

    pub async fn find_note(&self, id: NoteId) -> Note {
        self.store
            .notes()
            .find_note(self.ctx.user_id, id)
            .await
            .expect("find note")
            .expect("note exists")
    }

    /// `note.folder_id == F` exactly when `note.id` is in `F.note_ids`.
    pub async fn assert_consistent(&self) {
        let folders = self.store.folders().list_folders(self.ctx.user_id).await.unwrap();
        let notes = self.store.notes().list_notes(self.ctx.user_id).await.unwrap();

        for folder in &folders {
            let cached: HashSet<NoteId> = folder.note_ids.iter().copied().collect();
            assert_eq!(cached.len(), folder.note_ids.len(), "duplicate cache entry");
            let filed: HashSet<NoteId> = notes
                .iter()
                .filter(|n| n.folder_id == Some(folder.id))
                .map(|n| n.id)
                .collect();
            assert_eq!(cached, filed, "cache drift on folder {}", folder.id);
        }
        for note in &notes {
            if let Some(folder_id) = note.folder_id {
                assert!(
                    folders.iter().any(|f| f.id == folder_id),
                    "note {} points at a missing folder",
                    note.id
                );
            }
        }
        self.assert_depth_invariant().await;
    }

    /// Every parent exists, has the same owner, and no chain exceeds the limit.
    pub async fn assert_depth_invariant(&self) {
        let folders = self.store.folders().list_folders(self.ctx.user_id).await.unwrap();
        for folder in &folders {
            let mut level = 1;
            let mut current = folder.parent_id;
            while let Some(parent_id) = current {
                let parent = folders
                    .iter()
                    .find(|f| f.id == parent_id)
                    .expect("parent exists");
                assert_eq!(parent.owner_id, folder.owner_id);
                level += 1;
                assert!(level <= MAX_FOLDER_DEPTH, "folder {} too deep", folder.id);
                current = parent.parent_id;
            }
        }
    }
}

/// A memory store that fails one armed call with a storage error and
/// counts calls per operation.
pub(crate) struct FaultyStore {
    inner: MemoryStore,
    armed: Mutex<Option<(&'static str, usize)>>,
    calls: Mutex<HashMap<&'static str, usize>>,
}

impl FaultyStore {
    fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            armed: Mutex::new(None),
            calls: Mutex::new(HashMap::new()),
        }
    }

    /// Fail the `nth` call to `op` from now on. Resets every call count.
    pub fn arm(&self, op: &'static str, nth: usize) {
        self.calls.lock().unwrap().clear();
        *self.armed.lock().unwrap() = Some((op, nth));
    }

    pub fn disarm(&self) {
        *self.armed.lock().unwrap() = None;
    }

    /// Calls to `op` since the store was last armed.
    pub fn calls(&self, op: &'static str) -> usize {
        self.calls.lock().unwrap().get(op).copied().unwrap_or(0)
    }

    fn hit(&self, op: &'static str) -> AppResult<()> {
        let mut calls = self.calls.lock().unwrap();
        let count = calls.entry(op).or_default();
        *count += 1;
        if *self.armed.lock().unwrap() == Some((op, *count)) {
            return Err(AppError::storage(format!("{op} failed")));
        }
        Ok(())
    }
}

#[async_trait]
impl FolderStore for FaultyStore {
    async fn find_folder(&self, owner: UserId, id: FolderId) -> AppResult<Option<Folder>> {
        self.hit("find_folder")?;
        self.inner.find_folder(owner, id).await
    }

    async fn list_folders(&self, owner: UserId) -> AppResult<Vec<Folder>> {
        self.hit("list_folders")?;
        self.inner.list_folders(owner).await
    }

    async fn list_child_folders(&self, owner: UserId, parent: FolderId) -> AppResult<Vec<Folder>> {
        self.hit("list_child_folders")?;
        self.inner.list_child_folders(owner, parent).await
    }

    async fn insert_folder(&self, new: &NewFolder) -> AppResult<Folder> {
        self.hit("insert_folder")?;
        self.inner.insert_folder(new).await
    }

    async fn update_folder(
        &self,
        owner: UserId,
        id: FolderId,
        name: &str,
        parent: Option<FolderId>,
    ) -> AppResult<Option<Folder>> {
        self.hit("update_folder")?;
        self.inner.update_folder(owner, id, name, parent).await
    }

    async fn set_folder_parent(
        &self,
        owner: UserId,
        id: FolderId,
        parent: Option<FolderId>,
    ) -> AppResult<Option<Folder>> {
        self.hit("set_folder_parent")?;
        self.inner.set_folder_parent(owner, id, parent).await
    }

    async fn delete_folder(&self, owner: UserId, id: FolderId) -> AppResult<bool> {
        self.hit("delete_folder")?;
        self.inner.delete_folder(owner, id).await
    }

    async fn reparent_children(
        &self,
        owner: UserId,
        from: FolderId,
        to: Option<FolderId>,
    ) -> AppResult<u64> {
        self.hit("reparent_children")?;
        self.inner.reparent_children(owner, from, to).await
    }

    async fn set_note_ids(
        &self,
        owner: UserId,
        id: FolderId,
        note_ids: &[NoteId],
    ) -> AppResult<bool> {
        self.hit("set_note_ids")?;
        self.inner.set_note_ids(owner, id, note_ids).await
    }
}

#[async_trait]
impl NoteStore for FaultyStore {
    async fn find_note(&self, owner: UserId, id: NoteId) -> AppResult<Option<Note>> {
        self.hit("find_note")?;
        self.inner.find_note(owner, id).await
    }

    async fn list_notes(&self, owner: UserId) -> AppResult<Vec<Note>> {
        self.hit("list_notes")?;
        self.inner.list_notes(owner).await
    }

    async fn find_notes_by_ids(&self, owner: UserId, ids: &[NoteId]) -> AppResult<Vec<Note>> {
        self.hit("find_notes_by_ids")?;
        self.inner.find_notes_by_ids(owner, ids).await
    }

    async fn list_note_ids_in_folder(
        &self,
        owner: UserId,
        folder: FolderId,
    ) -> AppResult<Vec<NoteId>> {
        self.hit("list_note_ids_in_folder")?;
        self.inner.list_note_ids_in_folder(owner, folder).await
    }

    async fn insert_note(&self, new: &NewNote) -> AppResult<Note> {
        self.hit("insert_note")?;
        self.inner.insert_note(new).await
    }

    async fn update_note_content(
        &self,
        owner: UserId,
        id: NoteId,
        content: &NoteContent,
    ) -> AppResult<Option<Note>> {
        self.hit("update_note_content")?;
        self.inner.update_note_content(owner, id, content).await
    }

    async fn set_note_folder(
        &self,
        owner: UserId,
        id: NoteId,
        folder: Option<FolderId>,
    ) -> AppResult<Option<Note>> {
        self.hit("set_note_folder")?;
        self.inner.set_note_folder(owner, id, folder).await
    }

    async fn delete_note(&self, owner: UserId, id: NoteId) -> AppResult<bool> {
        self.hit("delete_note")?;
        self.inner.delete_note(owner, id).await
    }

    async fn reassign_notes(
        &self,
        owner: UserId,
        from: FolderId,
        to: Option<FolderId>,
    ) -> AppResult<u64> {
        self.hit("reassign_notes")?;
        self.inner.reassign_notes(owner, from, to).await
    }
}
