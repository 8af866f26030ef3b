//! Typed error enum for the service layer.
//!
//! Unifies storage, LLM and validation failures into a single error type so
//! the HTTP layer can map each failure mode to a status code.

use daily_report_core::DomainError;
use daily_report_llm::LlmError;
use daily_report_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (DB, duplicate, corrupt row, etc.).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// LLM API call failed, after any retries.
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    /// Caller provided invalid input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The record is absent or belongs to another owner.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
}

impl ServiceError {
    pub(crate) fn report_not_found(id: &str) -> Self {
        Self::NotFound { entity: "report", id: id.to_owned() }
    }

    /// Whether this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Storage(e) => e.is_not_found(),
            _ => false,
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}
