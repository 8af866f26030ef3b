//! Storage layer for daily-report
//!
//! Report and summary persistence behind async domain traits, with a
//! PostgreSQL backend for production and an in-memory backend for local
//! runs and tests.

mod backend;
pub mod error;
mod memory;
#[cfg(feature = "postgres")]
mod pg_migrations;
#[cfg(feature = "postgres")]
mod pg_storage;
pub mod traits;

pub use backend::StorageBackend;
pub use error::StorageError;
pub use memory::MemoryStorage;
#[cfg(feature = "postgres")]
pub use pg_storage::PgStorage;
pub use traits::{ReportFilter, ReportStore, SortOrder, SummaryStore};
