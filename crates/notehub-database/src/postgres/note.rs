//! Note queries.

use async_trait::async_trait;

use notehub_core::error::{AppError, ErrorKind};
use notehub_core::result::AppResult;
use notehub_core::types::id::{FolderId, NoteId, UserId};
use notehub_entity::note::{NewNote, Note, NoteContent};

use super::PgStore;
use crate::traits::NoteStore;

#[async_trait]
impl NoteStore for PgStore {
    async fn find_note(&self, owner: UserId, id: NoteId) -> AppResult<Option<Note>> {
        sqlx::query_as::<_, Note>("SELECT * FROM notes WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to find note", e))
    }

    async fn list_notes(&self, owner: UserId) -> AppResult<Vec<Note>> {
        sqlx::query_as::<_, Note>(
            "SELECT * FROM notes WHERE owner_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(owner)
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to list notes", e))
    }

    async fn find_notes_by_ids(&self, owner: UserId, ids: &[NoteId]) -> AppResult<Vec<Note>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, Note>(
            "SELECT * FROM notes WHERE owner_id = $1 AND id = ANY($2) \
             ORDER BY created_at ASC, id ASC",
        )
        .bind(owner)
        .bind(ids)
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to resolve notes", e))
    }

    async fn list_note_ids_in_folder(
        &self,
        owner: UserId,
        folder: FolderId,
    ) -> AppResult<Vec<NoteId>> {
        sqlx::query_scalar::<_, NoteId>(
            "SELECT id FROM notes WHERE owner_id = $1 AND folder_id = $2 \
             ORDER BY created_at ASC, id ASC",
        )
        .bind(owner)
        .bind(folder)
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to list folder notes", e))
    }

    async fn insert_note(&self, new: &NewNote) -> AppResult<Note> {
        sqlx::query_as::<_, Note>(
            "INSERT INTO notes (id, title, key_points, detailed_notes, summary, owner_id, folder_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(NoteId::new())
        .bind(&new.content.title)
        .bind(&new.content.key_points)
        .bind(&new.content.detailed_notes)
        .bind(&new.content.summary)
        .bind(new.owner_id)
        .bind(new.folder_id)
        .fetch_one(self.pool())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to create note", e))
    }

    async fn update_note_content(
        &self,
        owner: UserId,
        id: NoteId,
        content: &NoteContent,
    ) -> AppResult<Option<Note>> {
        sqlx::query_as::<_, Note>(
            "UPDATE notes SET title = $3, key_points = $4, detailed_notes = $5, summary = $6, \
             updated_at = NOW() WHERE id = $1 AND owner_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(owner)
        .bind(&content.title)
        .bind(&content.key_points)
        .bind(&content.detailed_notes)
        .bind(&content.summary)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to update note", e))
    }

    async fn set_note_folder(
        &self,
        owner: UserId,
        id: NoteId,
        folder: Option<FolderId>,
    ) -> AppResult<Option<Note>> {
        sqlx::query_as::<_, Note>(
            "UPDATE notes SET folder_id = $3, updated_at = NOW() \
             WHERE id = $1 AND owner_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(owner)
        .bind(folder)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to move note", e))
    }

    async fn delete_note(&self, owner: UserId, id: NoteId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner)
            .execute(self.pool())
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to delete note", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn reassign_notes(
        &self,
        owner: UserId,
        from: FolderId,
        to: Option<FolderId>,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notes SET folder_id = $3, updated_at = NOW() \
             WHERE owner_id = $1 AND folder_id = $2",
        )
        .bind(owner)
        .bind(from)
        .bind(to)
        .execute(self.pool())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to reassign notes", e))?;
        Ok(result.rows_affected())
    }
}
