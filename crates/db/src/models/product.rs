//! Product entity model and DTOs.

use catalog_core::types::{DbId, Timestamp};
use catalog_core::validation::{require_any, validate_price, FieldOrder};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// A product row from the `products` table, joined with its category name.
///
/// `category_id` becomes `NULL` when the referenced category is deleted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub category_id: Option<DbId>,
    pub category_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new product.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200, message = "name must be between 1 and 200 characters"))]
    pub name: String,
    #[validate(length(max = 1000, message = "description must be at most 1000 characters"))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    #[validate(range(min = 0, message = "stock must not be negative"))]
    pub stock: i32,
    #[validate(range(min = 1, message = "category_id must be a positive integer"))]
    pub category_id: DbId,
}

impl FieldOrder for CreateProduct {
    const FIELDS: &'static [&'static str] = &["name", "description", "price", "stock", "category_id"];
}

/// DTO for updating an existing product. All fields are optional, but at
/// least one must be present.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
#[validate(schema(function = "validate_update_product"))]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200, message = "name must be between 1 and 200 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 1000, message = "description must be at most 1000 characters"))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_price"))]
    pub price: Option<Decimal>,
    #[validate(range(min = 0, message = "stock must not be negative"))]
    pub stock: Option<i32>,
    #[validate(range(min = 1, message = "category_id must be a positive integer"))]
    pub category_id: Option<DbId>,
}

impl FieldOrder for UpdateProduct {
    const FIELDS: &'static [&'static str] = &["name", "description", "price", "stock", "category_id"];
}

fn validate_update_product(input: &UpdateProduct) -> Result<(), ValidationError> {
    require_any(&[
        input.name.is_some(),
        input.description.is_some(),
        input.price.is_some(),
        input.stock.is_some(),
        input.category_id.is_some(),
    ])
}
