//! Field-level validation helpers shared by the request schemas.
//!
//! Schemas themselves are `validator::Validate` derives on the request DTOs.
//! This module adds the custom rules the derive cannot express and turns a
//! `ValidationErrors` map into a deterministic, ordered list of messages.

use std::borrow::Cow;

use rust_decimal::Decimal;
use serde::Serialize;
use validator::{ValidationError, ValidationErrors};

/// Key `validator` uses for struct-level (schema) errors.
pub const SCHEMA_FIELD: &str = "__all__";

/// Message reported when an update body carries no fields at all.
pub const AT_LEAST_ONE_FIELD: &str = "at least one field required";

/// Largest price a `NUMERIC(10,2)` column can hold.
pub fn max_price() -> Decimal {
    Decimal::new(9_999_999_999, 2)
}

/// Declared field order of a request schema.
///
/// `validator` stores errors in a hash map, so the schema has to state its
/// own order for "first violation" to be stable across runs.
pub trait FieldOrder {
    const FIELDS: &'static [&'static str];
}

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// Collect the first violated rule of every failing field, in declared order.
///
/// Schema-level errors come last. Fields missing from `order` are appended in
/// name order so nothing is silently dropped.
pub fn violations(errors: &ValidationErrors, order: &[&str]) -> Vec<FieldViolation> {
    let field_errors = errors.field_errors();
    let mut out = Vec::new();

    for field in order {
        if let Some(first) = field_errors.get(*field).and_then(|errs| errs.first()) {
            out.push(to_violation(field, first));
        }
    }

    let mut rest: Vec<_> = field_errors
        .iter()
        .filter(|(name, _)| {
            let name: &str = name;
            !order.contains(&name) && name != SCHEMA_FIELD
        })
        .collect();
    rest.sort_by(|a, b| a.0.cmp(b.0));
    for (name, errs) in rest {
        if let Some(first) = errs.first() {
            out.push(to_violation(name, first));
        }
    }

    if let Some(first) = field_errors.get(SCHEMA_FIELD).and_then(|errs| errs.first()) {
        out.push(to_violation(SCHEMA_FIELD, first));
    }

    out
}

/// The first violation of a schema, in its declared field order.
pub fn first_violation<T: FieldOrder>(errors: &ValidationErrors) -> Option<FieldViolation> {
    violations(errors, T::FIELDS).into_iter().next()
}

fn to_violation(field: &str, err: &ValidationError) -> FieldViolation {
    let message = match &err.message {
        Some(msg) => msg.to_string(),
        None => format!("{field} is invalid ({})", err.code),
    };
    FieldViolation {
        field: field.to_string(),
        message,
    }
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

// ---------------------------------------------------------------------------
// Custom rules
// ---------------------------------------------------------------------------

/// Price must be `> 0`, fit `NUMERIC(10,2)`, and carry at most two decimals.
pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() || price.is_zero() {
        return Err(error("positive", "price must be greater than 0"));
    }
    if *price > max_price() {
        return Err(error("max", "price must not exceed 99999999.99"));
    }
    if price.normalize().scale() > 2 {
        return Err(error("scale", "price must have at most two decimal places"));
    }
    Ok(())
}

/// Fails with [`AT_LEAST_ONE_FIELD`] when none of the flags is set.
pub fn require_any(present: &[bool]) -> Result<(), ValidationError> {
    if present.iter().any(|p| *p) {
        Ok(())
    } else {
        Err(error("at_least_one", AT_LEAST_ONE_FIELD))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
