pub mod health;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use catalog_core::uploads::UploadPolicy;

use crate::handlers::{category, file, product, time, upload, user};
use crate::state::AppState;

/// Room for multipart framing around a single file.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Build the `/api` route tree.
///
/// ```text
/// /time/time                       server clock
/// /time/health                     service health (memory, store)
///
/// /files/files                     list stored uploads
/// /files/{filename}                download one
///
/// /upload/single                   multipart `file`
/// /upload/multiple                 multipart `files` (<= 10)
///
/// /users                           list (paginated), create
/// /users/{id}                      get, update, delete
///
/// /products                        list (paginated, ?category_id), create
/// /products/{id}                   get, update, delete
///
/// /categories                      list (by name), create
/// /categories/{id}                 get, update, delete
/// ```
pub fn api_routes(upload_policy: &UploadPolicy) -> Router<AppState> {
    Router::new()
        .nest("/time", time_routes())
        .nest("/files", file_routes())
        .nest("/upload", upload_routes(upload_policy))
        .route("/users", get(user::list).post(user::create))
        .route(
            "/users/{id}",
            get(user::get_by_id).put(user::update).delete(user::delete),
        )
        .route("/products", get(product::list).post(product::create))
        .route(
            "/products/{id}",
            get(product::get_by_id)
                .put(product::update)
                .delete(product::delete),
        )
        .route("/categories", get(category::list).post(category::create))
        .route(
            "/categories/{id}",
            get(category::get_by_id)
                .put(category::update)
                .delete(category::delete),
        )
}

fn time_routes() -> Router<AppState> {
    Router::new()
        .route("/time", get(time::server_time))
        .route("/health", get(time::health))
}

/// `/files/files` is a literal segment and wins over `/{filename}`.
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files", get(file::list))
        .route("/{filename}", get(file::download))
}

/// Upload routes lift axum's default 2 MB body cap to fit the policy.
fn upload_routes(policy: &UploadPolicy) -> Router<AppState> {
    let single_limit = usize::try_from(policy.max_file_size)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route(
            "/single",
            post(upload::single).layer(DefaultBodyLimit::max(single_limit)),
        )
        .route(
            "/multiple",
            post(upload::multiple).layer(DefaultBodyLimit::max(policy.body_limit())),
        )
}
