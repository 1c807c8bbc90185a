//! Note CRUD and move handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use notehub_core::types::id::NoteId;
use notehub_entity::note::Note;

use crate::dto::request::{MoveNoteRequest, NoteRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::state::AppState;

/// GET /api/notes
pub async fn list_notes(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Note>>>, ApiError> {
    let notes = state.note_service.list_notes(&auth).await?;
    Ok(Json(ApiResponse::ok(notes)))
}

/// GET /api/notes/{id}
pub async fn get_note(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<NoteId>,
) -> Result<Json<ApiResponse<Note>>, ApiError> {
    let note = state.note_service.get_note(&auth, id).await?;
    Ok(Json(ApiResponse::ok(note)))
}

/// POST /api/notes
pub async fn create_note(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<NoteRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Note>>), ApiError> {
    let note = state
        .note_service
        .create_note(&auth, req.content(), req.folder_id)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(note))))
}

/// PUT /api/notes/{id}
pub async fn update_note(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<NoteId>,
    ValidatedJson(req): ValidatedJson<NoteRequest>,
) -> Result<Json<ApiResponse<Note>>, ApiError> {
    let note = state
        .note_service
        .update_note(&auth, id, req.content())
        .await?;

    Ok(Json(ApiResponse::ok(note)))
}

/// PATCH /api/notes/{id}/folder
pub async fn move_note(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<NoteId>,
    ValidatedJson(req): ValidatedJson<MoveNoteRequest>,
) -> Result<Json<ApiResponse<Note>>, ApiError> {
    let note = state
        .note_service
        .move_note(&auth, id, req.new_folder_id)
        .await?;

    Ok(Json(ApiResponse::ok(note)))
}

/// DELETE /api/notes/{id}
pub async fn delete_note(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<NoteId>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.note_service.delete_note(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Note deleted successfully".to_string(),
    })))
}
