//! Shared query parameter types for API handlers.
//!
//! `page` is validated (>= 1) by the extractor; `limit` is clamped, not
//! rejected, when turned into a [`PageRequest`]. Non-integer values fail
//! deserialization and surface as 400.

use catalog_core::pagination::PageRequest;
use catalog_core::types::DbId;
use catalog_core::validation::FieldOrder;
use serde::Deserialize;
use validator::Validate;

/// Pagination parameters (`?page=&limit=`).
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PaginationParams {
    #[validate(range(min = 1, message = "page must be a positive integer"))]
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PaginationParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

impl FieldOrder for PaginationParams {
    const FIELDS: &'static [&'static str] = &["page", "limit"];
}

/// Product list parameters: pagination plus an optional category filter.
///
/// Kept flat rather than `#[serde(flatten)]`ing [`PaginationParams`], since
/// flattened query strings lose their integer parsing.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ProductListParams {
    #[validate(range(min = 1, message = "page must be a positive integer"))]
    pub page: Option<i64>,
    pub limit: Option<i64>,
    #[validate(range(min = 1, message = "category_id must be a positive integer"))]
    pub category_id: Option<DbId>,
}

impl ProductListParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

impl FieldOrder for ProductListParams {
    const FIELDS: &'static [&'static str] = &["page", "limit", "category_id"];
}
