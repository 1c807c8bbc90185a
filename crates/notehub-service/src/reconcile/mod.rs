//! Cache reconciliation.
//!
//! Compares every folder's note cache with the notes that actually point at
//! it, and repairs records left behind by an interrupted multi-step
//! operation.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use notehub_core::result::AppResult;
use notehub_core::types::id::{FolderId, NoteId, UserId};
use notehub_database::traits::{FolderStore, NoteStore, UserStore};

use crate::note::FolderNoteIndex;

/// Cache drift found on one folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderDrift {
    /// The folder whose cache disagrees with the notes collection.
    pub folder_id: FolderId,
    /// Notes filed in the folder but absent from its cache.
    pub missing: Vec<NoteId>,
    /// Cache entries that do not point back at the folder (or repeat).
    pub stray: Vec<NoteId>,
}

/// Result of checking (and possibly repairing) one user's records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileReport {
    /// The user checked.
    pub user_id: Option<UserId>,
    /// Number of folders inspected.
    pub folders_checked: usize,
    /// Folders whose cache drifted.
    pub drift: Vec<FolderDrift>,
    /// Notes pointing at a folder that no longer exists.
    pub dangling_notes: Vec<NoteId>,
    /// Folders whose parent no longer exists.
    pub dangling_folders: Vec<FolderId>,
    /// Whether the problems above were repaired.
    pub repaired: bool,
}

impl ReconcileReport {
    /// Whether every cache and reference was consistent.
    pub fn is_clean(&self) -> bool {
        self.drift.is_empty() && self.dangling_notes.is_empty() && self.dangling_folders.is_empty()
    }
}

/// Verifies and repairs the folder note caches.
#[derive(Clone)]
pub struct ReconcileService {
    folders: Arc<dyn FolderStore>,
    notes: Arc<dyn NoteStore>,
    users: Arc<dyn UserStore>,
    index: FolderNoteIndex,
}

impl std::fmt::Debug for ReconcileService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReconcileService").finish_non_exhaustive()
    }
}

impl ReconcileService {
    /// Creates a new reconciliation service.
    pub fn new(
        folders: Arc<dyn FolderStore>,
        notes: Arc<dyn NoteStore>,
        users: Arc<dyn UserStore>,
        index: FolderNoteIndex,
    ) -> Self {
        Self {
            folders,
            notes,
            users,
            index,
        }
    }

    /// Reports drift for one user without changing anything.
    pub async fn verify(&self, owner: UserId) -> AppResult<ReconcileReport> {
        let folders = self.folders.list_folders(owner).await?;
        let notes = self.notes.list_notes(owner).await?;

        let known: HashSet<FolderId> = folders.iter().map(|f| f.id).collect();
        let mut members: HashMap<FolderId, Vec<NoteId>> = HashMap::new();
        let mut dangling_notes = Vec::new();
        for note in &notes {
            if let Some(folder_id) = note.folder_id {
                if known.contains(&folder_id) {
                    members.entry(folder_id).or_default().push(note.id);
                } else {
                    dangling_notes.push(note.id);
                }
            }
        }

        let mut drift = Vec::new();
        let mut dangling_folders = Vec::new();
        for folder in &folders {
            if folder.parent_id.is_some_and(|p| !known.contains(&p)) {
                dangling_folders.push(folder.id);
            }

            let expected = members.get(&folder.id).map(Vec::as_slice).unwrap_or(&[]);
            let expected_set: HashSet<NoteId> = expected.iter().copied().collect();
            let mut seen = HashSet::new();
            let stray: Vec<NoteId> = folder
                .note_ids
                .iter()
                .copied()
                .filter(|id| !expected_set.contains(id) || !seen.insert(*id))
                .collect();
            let missing: Vec<NoteId> = expected
                .iter()
                .copied()
                .filter(|id| !folder.note_ids.contains(id))
                .collect();

            if !stray.is_empty() || !missing.is_empty() {
                warn!(
                    user_id = %owner,
                    folder_id = %folder.id,
                    missing = missing.len(),
                    stray = stray.len(),
                    "Folder note cache drift"
                );
                drift.push(FolderDrift {
                    folder_id: folder.id,
                    missing,
                    stray,
                });
            }
        }

        Ok(ReconcileReport {
            user_id: Some(owner),
            folders_checked: folders.len(),
            drift,
            dangling_notes,
            dangling_folders,
            repaired: false,
        })
    }

    /// Repairs one user's records and returns what was found.
    ///
    /// Notes pointing at a missing folder are unfiled, folders whose parent
    /// is missing become roots, and drifted caches are rebuilt.
    pub async fn repair(&self, owner: UserId) -> AppResult<ReconcileReport> {
        let mut report = self.verify(owner).await?;
        if report.is_clean() {
            return Ok(report);
        }

        for note_id in &report.dangling_notes {
            self.notes.set_note_folder(owner, *note_id, None).await?;
        }
        for folder_id in &report.dangling_folders {
            self.folders.set_folder_parent(owner, *folder_id, None).await?;
        }
        for drift in &report.drift {
            self.index.sync(owner, drift.folder_id).await?;
        }

        report.repaired = true;
        info!(
            user_id = %owner,
            folders = report.drift.len(),
            dangling_notes = report.dangling_notes.len(),
            dangling_folders = report.dangling_folders.len(),
            "Folder caches repaired"
        );
        Ok(report)
    }

    /// Repairs every registered user. Returns only the reports that found
    /// something.
    pub async fn repair_all(&self) -> AppResult<Vec<ReconcileReport>> {
        let mut reports = Vec::new();
        for user_id in self.users.list_user_ids().await? {
            let report = self.repair(user_id).await?;
            if !report.is_clean() {
                reports.push(report);
            }
        }
        Ok(reports)
    }
}
