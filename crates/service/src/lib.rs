//! Service layer for daily-report
//!
//! Centralizes business logic between HTTP handlers and storage/llm.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]

mod error;
mod report_service;
mod summary_service;

#[cfg(test)]
mod summary_service_tests;

pub use error::ServiceError;
pub use report_service::ReportService;
pub use summary_service::SummaryService;
