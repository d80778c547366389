//! Handlers for browsing and downloading stored uploads under `/files`.

use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalog_core::file_store::FileEntry;
use catalog_core::uploads::extension_of;

use crate::error::AppResult;
use crate::response::ApiResponse;
use crate::state::AppState;

fn content_type_for(name: &str) -> &'static str {
    match extension_of(name).as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// GET /api/files/files
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<FileEntry>>>> {
    let files = state.file_store.list().await?;
    Ok(Json(ApiResponse::ok("Files retrieved successfully", files)))
}

/// GET /api/files/{filename}
///
/// Served as an attachment. Names are checked by the store, so anything
/// reaching the header is a plain `[A-Za-z0-9._-]` file name.
pub async fn download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> AppResult<Response> {
    let bytes = state.file_store.open(&filename).await?;
    let headers = [
        (CONTENT_TYPE, content_type_for(&filename).to_string()),
        (
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];
    Ok((headers, bytes).into_response())
}
