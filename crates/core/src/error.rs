use crate::types::DbId;

/// Domain-level failures raised by the service layer.
///
/// These never carry store or I/O detail; infrastructure faults travel
/// separately and are sanitized at the HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A referenced entity (e.g. a product's category) does not exist.
    #[error("Referenced entity not found: {entity} with id {id}")]
    MissingReference { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}
