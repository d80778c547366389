//! Handlers for the `/products` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use catalog_core::pagination::Paginated;
use catalog_db::models::product::{CreateProduct, Product, UpdateProduct};

use crate::error::AppResult;
use crate::extract::{IdPath, ValidatedJson, ValidatedQuery};
use crate::query::ProductListParams;
use crate::response::ApiResponse;
use crate::services::ProductService;
use crate::state::AppState;

/// GET /api/products?page=&limit=&category_id=
pub async fn list(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<ProductListParams>,
) -> AppResult<Json<ApiResponse<Paginated<Product>>>> {
    let page =
        ProductService::list(&state.pool, params.page_request(), params.category_id).await?;
    Ok(Json(ApiResponse::ok("Products retrieved successfully", page)))
}

/// GET /api/products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<ApiResponse<Product>>> {
    let product = ProductService::get(&state.pool, id).await?;
    Ok(Json(ApiResponse::ok("Product retrieved successfully", product)))
}

/// POST /api/products
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> AppResult<(StatusCode, Json<ApiResponse<Product>>)> {
    let product = ProductService::create(&state.pool, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Product created successfully", product)),
    ))
}

/// PUT /api/products/{id}
pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let product = ProductService::update(&state.pool, id, &input).await?;
    Ok(Json(ApiResponse::ok("Product updated successfully", product)))
}

/// DELETE /api/products/{id}
pub async fn delete(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<ApiResponse<()>>> {
    ProductService::delete(&state.pool, id).await?;
    Ok(Json(ApiResponse::done("Product deleted successfully")))
}
