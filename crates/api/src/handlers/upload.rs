//! Handlers for multipart file uploads under `/upload`.
//!
//! Every file in a request is read and checked against the [`UploadPolicy`]
//! before any of them is written, so a rejected request stores nothing.

use axum::body::Bytes;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use catalog_core::file_store::{FileMetadata, StoredFile};
use catalog_core::uploads::{UploadPolicy, UploadRejection, MULTI_FILE_FIELD, SINGLE_FILE_FIELD};

use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::state::AppState;

struct PendingUpload {
    metadata: FileMetadata,
    bytes: Bytes,
}

fn multipart_error(err: MultipartError, policy: &UploadPolicy) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UploadRejection::TooLarge {
            limit: policy.max_file_size,
        }
        .into()
    } else {
        AppError::BadRequest(err.body_text())
    }
}

/// Read every file part of `multipart`, accepting only `expected_field` and
/// at most `max` files. Plain text parts are skipped.
async fn collect_files(
    multipart: Result<Multipart, MultipartRejection>,
    expected_field: &str,
    max: usize,
    policy: &UploadPolicy,
) -> AppResult<Vec<PendingUpload>> {
    let mut multipart = multipart.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, policy))?
    {
        let Some(original_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let field_name = field.name().unwrap_or_default().to_string();
        if field_name != expected_field {
            return Err(UploadRejection::UnexpectedField(field_name).into());
        }
        if files.len() == max {
            return Err(UploadRejection::TooManyFiles { max }.into());
        }

        let mimetype = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field.bytes().await.map_err(|e| multipart_error(e, policy))?;
        policy.check(&mimetype, bytes.len() as u64)?;

        files.push(PendingUpload {
            metadata: FileMetadata {
                field: field_name,
                original_name,
                mimetype,
            },
            bytes,
        });
    }

    Ok(files)
}

async fn store(state: &AppState, upload: PendingUpload) -> AppResult<StoredFile> {
    let stored = state.file_store.save(&upload.bytes, upload.metadata).await?;
    tracing::info!(
        filename = %stored.filename,
        size = stored.size,
        mimetype = %stored.mimetype,
        "File stored"
    );
    Ok(stored)
}

/// POST /api/upload/single (multipart field `file`)
pub async fn single(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<ApiResponse<StoredFile>>> {
    let policy = &state.config.upload;
    let upload = collect_files(multipart, SINGLE_FILE_FIELD, 1, policy)
        .await?
        .into_iter()
        .next()
        .ok_or(UploadRejection::NoFile)?;

    let stored = store(&state, upload).await?;
    Ok(Json(ApiResponse::ok("File uploaded successfully", stored)))
}

/// POST /api/upload/multiple (multipart field `files`, repeated)
pub async fn multiple(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<ApiResponse<Vec<StoredFile>>>> {
    let policy = &state.config.upload;
    let uploads = collect_files(multipart, MULTI_FILE_FIELD, policy.max_files, policy).await?;
    policy.check_count(uploads.len())?;

    let mut stored = Vec::with_capacity(uploads.len());
    for upload in uploads {
        stored.push(store(&state, upload).await?);
    }

    let message = format!("Uploaded {} files successfully", stored.len());
    Ok(Json(ApiResponse::ok(message, stored)))
}
