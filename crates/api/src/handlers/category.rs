//! Handlers for the `/categories` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use catalog_db::models::category::{Category, CreateCategory, UpdateCategory};

use crate::error::AppResult;
use crate::extract::{IdPath, ValidatedJson};
use crate::response::ApiResponse;
use crate::services::CategoryService;
use crate::state::AppState;

/// GET /api/categories
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Category>>>> {
    let categories = CategoryService::list(&state.pool).await?;
    Ok(Json(ApiResponse::ok(
        "Categories retrieved successfully",
        categories,
    )))
}

/// GET /api/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<ApiResponse<Category>>> {
    let category = CategoryService::get(&state.pool, id).await?;
    Ok(Json(ApiResponse::ok("Category retrieved successfully", category)))
}

/// POST /api/categories
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateCategory>,
) -> AppResult<(StatusCode, Json<ApiResponse<Category>>)> {
    let category = CategoryService::create(&state.pool, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Category created successfully", category)),
    ))
}

/// PUT /api/categories/{id}
pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateCategory>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let category = CategoryService::update(&state.pool, id, &input).await?;
    Ok(Json(ApiResponse::ok("Category updated successfully", category)))
}

/// DELETE /api/categories/{id}
pub async fn delete(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<ApiResponse<()>>> {
    CategoryService::delete(&state.pool, id).await?;
    Ok(Json(ApiResponse::done("Category deleted successfully")))
}
