//! User entity model and DTOs.

use catalog_core::types::{DbId, Timestamp};
use catalog_core::validation::{require_any, FieldOrder};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// A user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateUser {
    #[validate(length(min = 3, max = 50, message = "username must be between 3 and 50 characters"))]
    pub username: String,
    #[validate(
        email(message = "email must be a valid email address"),
        length(max = 255, message = "email must be at most 255 characters")
    )]
    pub email: String,
}

impl FieldOrder for CreateUser {
    const FIELDS: &'static [&'static str] = &["username", "email"];
}

/// DTO for updating an existing user. All fields are optional, but at least
/// one must be present.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
#[validate(schema(function = "validate_update_user"))]
pub struct UpdateUser {
    #[validate(length(min = 3, max = 50, message = "username must be between 3 and 50 characters"))]
    pub username: Option<String>,
    #[validate(
        email(message = "email must be a valid email address"),
        length(max = 255, message = "email must be at most 255 characters")
    )]
    pub email: Option<String>,
}

impl FieldOrder for UpdateUser {
    const FIELDS: &'static [&'static str] = &["username", "email"];
}

fn validate_update_user(input: &UpdateUser) -> Result<(), ValidationError> {
    require_any(&[input.username.is_some(), input.email.is_some()])
}
