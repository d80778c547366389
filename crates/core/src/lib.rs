//! Domain building blocks shared by the repository and HTTP layers.
//!
//! This crate has no internal dependencies so the pagination math, upload
//! rules, and validation helpers can be unit tested in isolation.

pub mod error;
pub mod file_store;
pub mod pagination;
pub mod types;
pub mod uploads;
pub mod validation;
