//! Handlers for the `/users` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use catalog_core::pagination::Paginated;
use catalog_db::models::user::{CreateUser, UpdateUser, User};

use crate::error::AppResult;
use crate::extract::{IdPath, ValidatedJson, ValidatedQuery};
use crate::query::PaginationParams;
use crate::response::ApiResponse;
use crate::services::UserService;
use crate::state::AppState;

/// GET /api/users
pub async fn list(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> AppResult<Json<ApiResponse<Paginated<User>>>> {
    let page = UserService::list(&state.pool, params.page_request()).await?;
    Ok(Json(ApiResponse::ok("Users retrieved successfully", page)))
}

/// GET /api/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<ApiResponse<User>>> {
    let user = UserService::get(&state.pool, id).await?;
    Ok(Json(ApiResponse::ok("User retrieved successfully", user)))
}

/// POST /api/users
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> AppResult<(StatusCode, Json<ApiResponse<User>>)> {
    let user = UserService::create(&state.pool, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("User created successfully", user)),
    ))
}

/// PUT /api/users/{id}
pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> AppResult<Json<ApiResponse<User>>> {
    let user = UserService::update(&state.pool, id, &input).await?;
    Ok(Json(ApiResponse::ok("User updated successfully", user)))
}

/// DELETE /api/users/{id}
pub async fn delete(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<ApiResponse<()>>> {
    UserService::delete(&state.pool, id).await?;
    Ok(Json(ApiResponse::done("User deleted successfully")))
}
