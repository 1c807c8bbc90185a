//! Folder CRUD, move, and tree handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use notehub_core::types::id::FolderId;
use notehub_entity::folder::{Folder, FolderDetail, FolderTree};
use notehub_service::CascadeReport;

use crate::dto::request::{CreateFolderRequest, MoveFolderRequest, UpdateFolderRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::state::AppState;

/// GET /api/folders
pub async fn list_folders(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<FolderDetail>>>, ApiError> {
    let folders = state.folder_service.list_folders(&auth).await?;
    Ok(Json(ApiResponse::ok(folders)))
}

/// GET /api/folders/tree
pub async fn get_tree(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<FolderTree>>, ApiError> {
    let tree = state.tree_service.get_tree(&auth).await?;
    Ok(Json(ApiResponse::ok(tree)))
}

/// GET /api/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<FolderId>,
) -> Result<Json<ApiResponse<FolderDetail>>, ApiError> {
    let folder = state.folder_service.get_folder(&auth, id).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateFolderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Folder>>), ApiError> {
    let folder = state
        .folder_service
        .create_folder(&auth, &req.name, req.parent_folder)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(folder))))
}

/// PUT /api/folders/{id}
pub async fn update_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<FolderId>,
    ValidatedJson(req): ValidatedJson<UpdateFolderRequest>,
) -> Result<Json<ApiResponse<Folder>>, ApiError> {
    let folder = state
        .folder_service
        .update_folder(&auth, id, &req.name, req.parent_change())
        .await?;

    Ok(Json(ApiResponse::ok(folder)))
}

/// PATCH /api/folders/{id}/parent
pub async fn move_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<FolderId>,
    ValidatedJson(req): ValidatedJson<MoveFolderRequest>,
) -> Result<Json<ApiResponse<Folder>>, ApiError> {
    let folder = state
        .folder_service
        .move_folder(&auth, id, req.new_parent_id)
        .await?;

    Ok(Json(ApiResponse::with_message(
        folder,
        "Folder moved successfully",
    )))
}

/// DELETE /api/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<FolderId>,
) -> Result<Json<ApiResponse<CascadeReport>>, ApiError> {
    let report = state.folder_service.delete_folder(&auth, id).await?;
    Ok(Json(ApiResponse::with_message(
        report,
        "Folder deleted successfully",
    )))
}
