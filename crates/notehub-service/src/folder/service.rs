//! Folder CRUD operations with hierarchy enforcement.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;

use notehub_core::error::AppError;
use notehub_core::result::AppResult;
use notehub_core::types::id::{FolderId, UserId};
use notehub_database::traits::{FolderStore, NoteStore};
use notehub_entity::folder::{Folder, FolderDetail, MAX_FOLDER_DEPTH, NewFolder};

use super::cascade::{CascadeCoordinator, CascadeReport};
use super::hierarchy::{normalize_name, validate_placement};
use crate::context::RequestContext;

/// How an update treats the folder's parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParentChange {
    /// Leave the parent as it is.
    #[default]
    Keep,
    /// Make the folder a root folder.
    Root,
    /// Move the folder under another folder.
    Under(FolderId),
}

impl ParentChange {
    /// A change that places the folder under `parent`, or at the top level.
    pub fn to(parent: Option<FolderId>) -> Self {
        parent.map_or(Self::Root, Self::Under)
    }
}

/// Manages folder CRUD operations.
#[derive(Clone)]
pub struct FolderService {
    /// Folder collection.
    folders: Arc<dyn FolderStore>,
    /// Note collection, for resolving folder members.
    notes: Arc<dyn NoteStore>,
    /// Deletion cascade.
    cascade: Arc<CascadeCoordinator>,
}

impl std::fmt::Debug for FolderService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FolderService").finish_non_exhaustive()
    }
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folders: Arc<dyn FolderStore>,
        notes: Arc<dyn NoteStore>,
        cascade: Arc<CascadeCoordinator>,
    ) -> Self {
        Self {
            folders,
            notes,
            cascade,
        }
    }

    /// Lists every folder of the current user with member notes resolved.
    pub async fn list_folders(&self, ctx: &RequestContext) -> AppResult<Vec<FolderDetail>> {
        let folders = self.folders.list_folders(ctx.user_id).await?;
        let mut details = Vec::with_capacity(folders.len());
        for folder in folders {
            details.push(self.resolve(ctx.user_id, folder).await?);
        }
        Ok(details)
    }

    /// Gets a folder by ID with member notes resolved.
    pub async fn get_folder(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
    ) -> AppResult<FolderDetail> {
        let folder = self.find_owned(ctx.user_id, folder_id).await?;
        self.resolve(ctx.user_id, folder).await
    }

    /// Creates a new folder, optionally nested under `parent_id`.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        name: &str,
        parent_id: Option<FolderId>,
    ) -> AppResult<Folder> {
        let name = normalize_name(name)?;

        if let Some(parent_id) = parent_id {
            let ancestry = self.resolve_ancestry(ctx.user_id, parent_id).await?;
            validate_placement(ctx.user_id, None, 1, &ancestry)?;
        }

        let folder = self
            .folders
            .insert_folder(&NewFolder {
                name,
                owner_id: ctx.user_id,
                parent_id,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            parent_id = ?folder.parent_id,
            "Folder created"
        );

        Ok(folder)
    }

    /// Renames a folder and applies a parent change, re-validating the
    /// hierarchy exactly as creation does.
    pub async fn update_folder(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
        name: &str,
        parent: ParentChange,
    ) -> AppResult<Folder> {
        let name = normalize_name(name)?;
        let folder = self.find_owned(ctx.user_id, folder_id).await?;

        let parent_id = match parent {
            ParentChange::Keep => folder.parent_id,
            ParentChange::Root => None,
            ParentChange::Under(id) => Some(id),
        };
        if parent_id != folder.parent_id {
            self.check_move(ctx.user_id, folder_id, parent_id).await?;
        }

        let folder = self
            .folders
            .update_folder(ctx.user_id, folder_id, &name, parent_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder_id,
            parent_id = ?folder.parent_id,
            "Folder updated"
        );

        Ok(folder)
    }

    /// Moves a folder under a new parent (or to the top level) without
    /// renaming it.
    pub async fn move_folder(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
        new_parent_id: Option<FolderId>,
    ) -> AppResult<Folder> {
        let folder = self.find_owned(ctx.user_id, folder_id).await?;
        if folder.parent_id == new_parent_id {
            return Ok(folder);
        }

        self.check_move(ctx.user_id, folder_id, new_parent_id).await?;

        let folder = self
            .folders
            .set_folder_parent(ctx.user_id, folder_id, new_parent_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder_id,
            new_parent_id = ?new_parent_id,
            "Folder moved"
        );

        Ok(folder)
    }

    /// Deletes a folder, relinking its children and notes to its parent.
    pub async fn delete_folder(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
    ) -> AppResult<CascadeReport> {
        self.cascade.delete_folder(ctx.user_id, folder_id).await
    }

    /// Validates placing `folder_id` (with its whole subtree) under `parent_id`.
    async fn check_move(
        &self,
        owner: UserId,
        folder_id: FolderId,
        parent_id: Option<FolderId>,
    ) -> AppResult<()> {
        let Some(parent_id) = parent_id else {
            return Ok(());
        };
        let ancestry = self.resolve_ancestry(owner, parent_id).await?;
        let height = self.subtree_height(owner, folder_id).await?;
        validate_placement(owner, Some(folder_id), height, &ancestry)
    }

    /// Height of the subtree rooted at `folder_id` (1 for a leaf), walked one
    /// level of children at a time.
    ///
    /// The walk stops at `MAX_FOLDER_DEPTH` levels, which already rules out
    /// every placement under a parent. Folders seen before are skipped, so a
    /// corrupted parent chain cannot loop.
    async fn subtree_height(&self, owner: UserId, folder_id: FolderId) -> AppResult<usize> {
        let mut visited = HashSet::from([folder_id]);
        let mut frontier = vec![folder_id];
        let mut height = 0;
        while !frontier.is_empty() && height < MAX_FOLDER_DEPTH {
            height += 1;
            let mut next = Vec::new();
            for parent in frontier {
                for child in self.folders.list_child_folders(owner, parent).await? {
                    if visited.insert(child.id) {
                        next.push(child.id);
                    }
                }
            }
            frontier = next;
        }
        Ok(height)
    }

    /// Walks from `parent_id` towards the root.
    ///
    /// The walk stops after `MAX_FOLDER_DEPTH + 1` folders, which is already
    /// enough to reject any placement, and on a repeated id.
    async fn resolve_ancestry(&self, owner: UserId, parent_id: FolderId) -> AppResult<Vec<Folder>> {
        let parent = self
            .folders
            .find_folder(owner, parent_id)
            .await?
            .ok_or_else(|| AppError::not_found("Parent folder does not exist."))?;

        let mut chain = vec![parent];
        while chain.len() <= MAX_FOLDER_DEPTH {
            let Some(next) = chain.last().and_then(|f| f.parent_id) else {
                break;
            };
            if chain.iter().any(|f| f.id == next) {
                break;
            }
            match self.folders.find_folder(owner, next).await? {
                Some(folder) => chain.push(folder),
                None => break,
            }
        }
        Ok(chain)
    }

    async fn find_owned(&self, owner: UserId, folder_id: FolderId) -> AppResult<Folder> {
        self.folders
            .find_folder(owner, folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    async fn resolve(&self, owner: UserId, folder: Folder) -> AppResult<FolderDetail> {
        let notes = self.notes.find_notes_by_ids(owner, &folder.note_ids).await?;
        Ok(FolderDetail { folder, notes })
    }
}
