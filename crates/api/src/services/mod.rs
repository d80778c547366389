//! Business service layer.
//!
//! Services sit between handlers and repositories. They perform the lookups
//! that turn store state into domain errors (not found, duplicate, missing
//! reference) and do the pagination math. Anything else the store raises is
//! passed through untouched as [`ServiceError::Database`].

pub mod category;
pub mod product;
pub mod user;

use catalog_core::error::CoreError;

pub use category::CategoryService;
pub use product::ProductService;
pub use user::UserService;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
