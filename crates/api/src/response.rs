//! Shared response envelope for API handlers.
//!
//! Every response, success or failure, is an [`ApiResponse`]:
//! `{ "success", "message", "data"?, "error"?, "code"? }`. Successful
//! responses carry `data`; failures carry `error` and a machine-readable
//! `code` and never `data`.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Successful response carrying `data`.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
            code: None,
        }
    }
}

impl ApiResponse<()> {
    /// Successful response with nothing to return (e.g. after a delete).
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            error: None,
            code: None,
        }
    }

    /// Failure envelope. Built by [`crate::error::AppError`] only.
    pub fn failure(message: impl Into<String>, error: impl Into<String>, code: &'static str) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error: Some(error.into()),
            code: Some(code),
        }
    }
}
