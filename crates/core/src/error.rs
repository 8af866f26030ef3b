use thiserror::Error;

/// Validation failures for domain values.
///
/// Every variant is a caller mistake; the service layer surfaces them as
/// invalid-request errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid period: {0}")]
    InvalidPeriod(String),

    #[error("invalid report: {0}")]
    InvalidReport(String),

    #[error("invalid summary: {0}")]
    InvalidSummary(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
