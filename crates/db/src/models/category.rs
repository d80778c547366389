//! Category entity model and DTOs.

use catalog_core::types::{DbId, Timestamp};
use catalog_core::validation::{require_any, FieldOrder};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// A category row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new category.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,
}

impl FieldOrder for CreateCategory {
    const FIELDS: &'static [&'static str] = &["name", "description"];
}

/// DTO for updating an existing category. At least one field is required.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
#[validate(schema(function = "validate_update_category"))]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,
}

impl FieldOrder for UpdateCategory {
    const FIELDS: &'static [&'static str] = &["name", "description"];
}

fn validate_update_category(input: &UpdateCategory) -> Result<(), ValidationError> {
    require_any(&[input.name.is_some(), input.description.is_some()])
}
