//! Validating extractors.
//!
//! [`ValidatedJson`] and [`ValidatedQuery`] deserialize the request, run the
//! type's `validator` rules, and reject with a 400 envelope carrying the
//! first violation in declared field order. Handlers only ever see values
//! that passed. [`IdPath`] does the same for a numeric `{id}` segment.

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use catalog_core::error::CoreError;
use catalog_core::types::DbId;
use catalog_core::validation::{first_violation, FieldOrder};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// A JSON body that deserialized and passed validation.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

/// A query string that deserialized and passed validation.
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

/// A positive integer `{id}` path segment.
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub DbId);

fn validation_error(message: impl Into<String>) -> AppError {
    AppError::Core(CoreError::Validation(message.into()))
}

fn check<T: Validate + FieldOrder>(value: &T) -> Result<(), AppError> {
    value.validate().map_err(|errors| {
        let message = first_violation::<T>(&errors)
            .map(|v| v.message)
            .unwrap_or_else(|| "Validation failed".to_string());
        validation_error(message)
    })
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + FieldOrder,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| validation_error(rejection.body_text()))?;
        check(&value)?;
        Ok(Self(value))
    }
}

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + FieldOrder,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| validation_error(rejection.body_text()))?;
        check(&value)?;
        Ok(Self(value))
    }
}

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<DbId>::from_request_parts(parts, state)
            .await
            .map_err(|_| validation_error("id must be a positive integer"))?;
        if id < 1 {
            return Err(validation_error("id must be a positive integer"));
        }
        Ok(Self(id))
    }
}
