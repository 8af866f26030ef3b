//! Typed error enum for the LLM crate.

use thiserror::Error;

/// Errors from LLM API operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("empty response: no choices returned")]
    EmptyResponse,
    #[error("client initialization failed: {0}")]
    ClientInit(String),
    #[error("all retries exhausted after {attempts} attempts, last error: {last}")]
    RetriesExhausted { attempts: u32, last: Box<LlmError> },
}

/// Whether a failed call may succeed if repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Retryable,
    Fatal,
}

impl LlmError {
    /// Only "service unavailable" and transport connect/timeout failures are
    /// retried. Everything else, including other 5xx codes, is fatal.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::HttpRequest(e) if e.is_connect() || e.is_timeout() => ErrorClass::Retryable,
            Self::HttpStatus { code: 503, .. } => ErrorClass::Retryable,
            _ => ErrorClass::Fatal,
        }
    }

    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.class() == ErrorClass::Retryable
    }
}
