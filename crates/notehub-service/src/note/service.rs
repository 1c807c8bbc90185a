//! Note CRUD and folder reassignment.

use std::sync::Arc;

use tracing::info;

use notehub_core::error::AppError;
use notehub_core::result::AppResult;
use notehub_core::types::id::{FolderId, NoteId, UserId};
use notehub_database::traits::{FolderStore, NoteStore};
use notehub_entity::note::{
    MAX_KEY_POINTS_LEN, MAX_NOTE_TITLE_LEN, MAX_SUMMARY_LEN, NewNote, Note, NoteContent,
};

use super::index::FolderNoteIndex;
use crate::context::RequestContext;

/// Manages notes and keeps folder membership caches in step with them.
#[derive(Clone)]
pub struct NoteService {
    /// Note collection.
    notes: Arc<dyn NoteStore>,
    /// Folder collection, for target lookups.
    folders: Arc<dyn FolderStore>,
    /// Folder cache maintenance.
    index: FolderNoteIndex,
}

impl std::fmt::Debug for NoteService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteService").finish_non_exhaustive()
    }
}

impl NoteService {
    /// Creates a new note service.
    pub fn new(
        notes: Arc<dyn NoteStore>,
        folders: Arc<dyn FolderStore>,
        index: FolderNoteIndex,
    ) -> Self {
        Self {
            notes,
            folders,
            index,
        }
    }

    /// Lists the current user's notes.
    pub async fn list_notes(&self, ctx: &RequestContext) -> AppResult<Vec<Note>> {
        self.notes.list_notes(ctx.user_id).await
    }

    /// Gets a note by ID.
    pub async fn get_note(&self, ctx: &RequestContext, note_id: NoteId) -> AppResult<Note> {
        self.notes
            .find_note(ctx.user_id, note_id)
            .await?
            .ok_or_else(|| AppError::not_found("Note not found"))
    }

    /// Creates a note, filing it in `folder_id` when given.
    ///
    /// The folder is checked before anything is written, so a bad folder id
    /// leaves no note behind.
    pub async fn create_note(
        &self,
        ctx: &RequestContext,
        content: NoteContent,
        folder_id: Option<FolderId>,
    ) -> AppResult<Note> {
        let content = normalize_content(content)?;

        if let Some(folder_id) = folder_id {
            self.require_folder(ctx.user_id, folder_id).await?;
        }

        let note = self
            .notes
            .insert_note(&NewNote {
                owner_id: ctx.user_id,
                content,
                folder_id,
            })
            .await?;
        self.index.sync_opt(ctx.user_id, folder_id).await?;

        info!(
            user_id = %ctx.user_id,
            note_id = %note.id,
            folder_id = ?folder_id,
            "Note created"
        );

        Ok(note)
    }

    /// Replaces a note's content. The folder reference is not touched.
    pub async fn update_note(
        &self,
        ctx: &RequestContext,
        note_id: NoteId,
        content: NoteContent,
    ) -> AppResult<Note> {
        let content = normalize_content(content)?;
        let note = self
            .notes
            .update_note_content(ctx.user_id, note_id, &content)
            .await?
            .ok_or_else(|| AppError::not_found("Note not found"))?;

        info!(user_id = %ctx.user_id, note_id = %note_id, "Note updated");
        Ok(note)
    }

    /// Moves a note to another folder, or unfiles it.
    ///
    /// Steps: point the note at the new folder, rebuild the old folder's
    /// cache, rebuild the new folder's cache. Each step is idempotent, so
    /// repeating the call after a failure converges.
    pub async fn move_note(
        &self,
        ctx: &RequestContext,
        note_id: NoteId,
        new_folder_id: Option<FolderId>,
    ) -> AppResult<Note> {
        let note = self.get_note(ctx, note_id).await?;
        if let Some(folder_id) = new_folder_id {
            self.require_folder(ctx.user_id, folder_id).await?;
        }
        let old_folder_id = note.folder_id;

        let note = self
            .notes
            .set_note_folder(ctx.user_id, note_id, new_folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("Note not found"))?;

        if old_folder_id != new_folder_id {
            self.index.sync_opt(ctx.user_id, old_folder_id).await?;
        }
        self.index.sync_opt(ctx.user_id, new_folder_id).await?;

        info!(
            user_id = %ctx.user_id,
            note_id = %note_id,
            from = ?old_folder_id,
            to = ?new_folder_id,
            "Note moved"
        );

        Ok(note)
    }

    /// Deletes a note and drops it from its folder's cache.
    pub async fn delete_note(&self, ctx: &RequestContext, note_id: NoteId) -> AppResult<()> {
        let note = self.get_note(ctx, note_id).await?;

        if !self.notes.delete_note(ctx.user_id, note_id).await? {
            return Err(AppError::not_found("Note not found"));
        }
        self.index.sync_opt(ctx.user_id, note.folder_id).await?;

        info!(user_id = %ctx.user_id, note_id = %note_id, "Note deleted");
        Ok(())
    }

    async fn require_folder(&self, owner: UserId, folder_id: FolderId) -> AppResult<()> {
        match self.folders.find_folder(owner, folder_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found("Folder not found")),
        }
    }
}

/// Trims the title and enforces the field limits.
fn normalize_content(mut content: NoteContent) -> AppResult<NoteContent> {
    content.title = content.title.trim().to_string();
    if content.title.is_empty() {
        return Err(AppError::validation("Note title is required."));
    }
    if content.title.chars().count() > MAX_NOTE_TITLE_LEN {
        return Err(AppError::validation(format!(
            "Note title must not exceed {MAX_NOTE_TITLE_LEN} characters."
        )));
    }
    if content.key_points.chars().count() > MAX_KEY_POINTS_LEN {
        return Err(AppError::validation(format!(
            "Key points must not exceed {MAX_KEY_POINTS_LEN} characters."
        )));
    }
    if content.summary.chars().count() > MAX_SUMMARY_LEN {
        return Err(AppError::validation(format!(
            "Summary must not exceed {MAX_SUMMARY_LEN} characters."
        )));
    }
    Ok(content)
}
