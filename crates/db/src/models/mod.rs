//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - A `Deserialize` + `Validate` update DTO (all `Option` fields) for patches
//!
//! The DTOs double as the request schemas: their `validator` rules are the
//! field-level contract enforced before a request reaches the service layer.

pub mod category;
pub mod product;
pub mod user;
