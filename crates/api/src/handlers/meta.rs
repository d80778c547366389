//! Root metadata and the catch-all 404.

use axum::http::Uri;
use axum::Json;
use serde::Serialize;

use crate::error::AppError;
use crate::response::ApiResponse;

#[derive(Debug, Serialize)]
pub struct ApiInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub endpoints: Endpoints,
}

#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub health: &'static str,
    pub time: &'static str,
    pub files: &'static str,
    pub upload: &'static str,
    pub users: &'static str,
    pub products: &'static str,
    pub categories: &'static str,
    pub uploads: &'static str,
}

/// GET /
pub async fn root() -> Json<ApiResponse<ApiInfo>> {
    Json(ApiResponse::ok(
        "Catalog API is running",
        ApiInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            endpoints: Endpoints {
                health: "/health",
                time: "/api/time",
                files: "/api/files",
                upload: "/api/upload",
                users: "/api/users",
                products: "/api/products",
                categories: "/api/categories",
                uploads: "/uploads",
            },
        },
    ))
}

/// Fallback for any unmatched path.
pub async fn fallback(uri: Uri) -> AppError {
    AppError::RouteNotFound(uri.path().to_string())
}
