//! Notes service routes

use std::path::Path as FsPath;

use axum::{
    Json, Router,
    extract::{
        DefaultBodyLimit, Multipart, Path, State, multipart::MultipartRejection,
        rejection::JsonRejection,
    },
    handler::Handler,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use common::{database::health_check as database_health, response::ApiMessage};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    export,
    models::{Import, ImportUpload, Note, NoteInput, SaveFileRequest, SearchQuery},
    state::AppState,
};

/// Create the router for the notes service
pub fn create_router(state: AppState) -> Router {
    let max_upload_bytes = state.max_upload_bytes;

    Router::new()
        .route("/health", get(health_check))
        .route("/notes", get(get_notes).post(create_note))
        .route("/notes/search", post(search_notes))
        .route("/notes/save-file/:id", post(save_file))
        .route(
            "/notes/:id",
            get(get_note).put(update_note).delete(delete_note),
        )
        .route(
            "/imports",
            get(get_imports)
                .post(upload_file.layer(DefaultBodyLimit::max(max_upload_bytes))),
        )
        .route("/imports/:id", get(get_import).delete(delete_import))
        .route("/imports/:id/export", post(export_import))
        .with_state(state)
}

/// Parse a record identifier from a path segment
fn parse_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest("Invalid ID format".to_string()))
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let status = if database_health(&state.database).await? {
        "ok"
    } else {
        "degraded"
    };

    Ok(Json(json!({
        "status": status,
        "service": "notes-service"
    })))
}

/// Get all notes
pub async fn get_notes(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let notes = state.note_repository.get_all().await?;
    Ok(Json(notes))
}

/// Get a note by ID
pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let note = state
        .note_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))?;

    Ok(Json(note))
}

/// Create a new note
pub async fn create_note(
    State(state): State<AppState>,
    payload: Result<Json<NoteInput>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(input) = payload?;
    input.validate().map_err(ApiError::BadRequest)?;

    let note = Note::new(input, Utc::now());
    state.note_repository.create(&note).await?;

    Ok((StatusCode::CREATED, Json(note)))
}

/// Overwrite the fields of a note
pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<NoteInput>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let Json(input) = payload?;
    input.validate().map_err(ApiError::BadRequest)?;

    let note = state
        .note_repository
        .update(id, &input.into_update(Utc::now()))
        .await?
        .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))?;

    Ok(Json(note))
}

/// Delete a note
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    if state.note_repository.delete(id).await? {
        Ok(Json(ApiMessage::message("Note deleted successfully")))
    } else {
        Err(ApiError::NotFound("Note not found".to_string()))
    }
}

/// Search notes by title, content and tags
pub async fn search_notes(
    State(state): State<AppState>,
    payload: Result<Json<SearchQuery>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(search) = payload?;
    if search.query.trim().is_empty() {
        return Err(ApiError::BadRequest("Search query is required".to_string()));
    }

    let notes = state.note_repository.search(&search.query).await?;
    info!("Search for {:?} matched {} notes", search.query, notes.len());

    Ok(Json(notes))
}

/// Write a note's content to a file on disk
pub async fn save_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SaveFileRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = payload?;
    if request.file_name.is_empty() {
        return Err(ApiError::BadRequest("File name is required".to_string()));
    }
    if request.file_path.is_empty() {
        return Err(ApiError::BadRequest("File location is required".to_string()));
    }
    let id = parse_id(&id)?;

    let note = state
        .note_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))?;

    let full_path = export::save_note(
        &note.title,
        &note.content,
        FsPath::new(&request.file_path),
        &request.file_name,
    )
    .await?;

    Ok(Json(ApiMessage::message(format!(
        "{} has been saved to {} successfully",
        request.file_name,
        full_path.display()
    ))))
}

/// Get all imports
pub async fn get_imports(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let imports = state.import_repository.get_all().await?;
    Ok(Json(imports))
}

/// Get an import by ID
pub async fn get_import(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let import = state
        .import_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Import not found".to_string()))?;

    Ok(Json(import))
}

/// Store an uploaded file
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<impl IntoResponse> {
    let mut multipart = multipart?;
    let mut upload = ImportUpload::default();
    let mut has_file = false;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                upload.file_name = field.file_name().unwrap_or("unnamed").to_string();
                upload.data = field.bytes().await?.to_vec();
                has_file = true;
            }
            "tags" | "location" | "resolution" | "duration" => {
                let value = field.text().await?;
                match name.as_str() {
                    "tags" => upload.tags = value,
                    "location" => upload.location = value,
                    "resolution" => upload.resolution = Some(value),
                    _ => upload.duration = Some(value),
                }
            }
            _ => {}
        }
    }

    if !has_file {
        return Err(ApiError::BadRequest("File upload failed".to_string()));
    }

    let import = Import::new(upload, Utc::now());
    state.import_repository.create(&import).await?;

    Ok((StatusCode::CREATED, Json(import)))
}

/// Delete an import
pub async fn delete_import(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    if state.import_repository.delete(id).await? {
        Ok(Json(ApiMessage::message("Import deleted successfully")))
    } else {
        Err(ApiError::NotFound("Import not found".to_string()))
    }
}

/// Write an import's stored payload into the export directory
pub async fn export_import(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let import = state
        .import_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Import not found".to_string()))?;

    export::export_payload(&state.export_dir, &import.file_name, &import.data).await?;

    Ok(Json(ApiMessage::message("File exported successfully")))
}
