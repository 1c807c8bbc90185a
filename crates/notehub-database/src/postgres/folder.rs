//! Folder queries.

use async_trait::async_trait;

use notehub_core::error::{AppError, ErrorKind};
use notehub_core::result::AppResult;
use notehub_core::types::id::{FolderId, NoteId, UserId};
use notehub_entity::folder::{Folder, NewFolder};

use super::PgStore;
use crate::traits::FolderStore;

#[async_trait]
impl FolderStore for PgStore {
    async fn find_folder(&self, owner: UserId, id: FolderId) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to find folder", e))
    }

    async fn list_folders(&self, owner: UserId) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE owner_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(owner)
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to list folders", e))
    }

    async fn list_child_folders(&self, owner: UserId, parent: FolderId) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE owner_id = $1 AND parent_id = $2 \
             ORDER BY created_at ASC, id ASC",
        )
        .bind(owner)
        .bind(parent)
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to list child folders", e))
    }

    async fn insert_folder(&self, new: &NewFolder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (id, name, owner_id, parent_id) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(FolderId::new())
        .bind(&new.name)
        .bind(new.owner_id)
        .bind(new.parent_id)
        .fetch_one(self.pool())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to create folder", e))
    }

    async fn update_folder(
        &self,
        owner: UserId,
        id: FolderId,
        name: &str,
        parent: Option<FolderId>,
    ) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET name = $3, parent_id = $4, updated_at = NOW() \
             WHERE id = $1 AND owner_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(owner)
        .bind(name)
        .bind(parent)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to update folder", e))
    }

    async fn set_folder_parent(
        &self,
        owner: UserId,
        id: FolderId,
        parent: Option<FolderId>,
    ) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET parent_id = $3, updated_at = NOW() \
             WHERE id = $1 AND owner_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(owner)
        .bind(parent)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to move folder", e))
    }

    async fn delete_folder(&self, owner: UserId, id: FolderId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner)
            .execute(self.pool())
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to delete folder", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn reparent_children(
        &self,
        owner: UserId,
        from: FolderId,
        to: Option<FolderId>,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE folders SET parent_id = $3, updated_at = NOW() \
             WHERE owner_id = $1 AND parent_id = $2",
        )
        .bind(owner)
        .bind(from)
        .bind(to)
        .execute(self.pool())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to reparent folders", e))?;
        Ok(result.rows_affected())
    }

    async fn set_note_ids(
        &self,
        owner: UserId,
        id: FolderId,
        note_ids: &[NoteId],
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE folders SET note_ids = $3, updated_at = NOW() \
             WHERE id = $1 AND owner_id = $2",
        )
        .bind(id)
        .bind(owner)
        .bind(note_ids)
        .execute(self.pool())
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to update folder notes", e)
        })?;
        Ok(result.rows_affected() > 0)
    }
}
