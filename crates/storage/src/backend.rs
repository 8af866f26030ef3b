//! Unified storage backend with enum dispatch.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use daily_report_core::{MonthPeriod, Report, Summary, SummaryInput};

use crate::error::StorageError;
use crate::memory::MemoryStorage;
use crate::traits::{ReportFilter, ReportStore, SummaryStore};

macro_rules! dispatch {
    ($self:expr, $trait:path, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            #[cfg(feature = "postgres")]
            StorageBackend::Postgres(s) => <crate::pg_storage::PgStorage as $trait>::$method(s, $($arg),*).await,
            StorageBackend::Memory(s) => <MemoryStorage as $trait>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    #[cfg(feature = "postgres")]
    Postgres(crate::pg_storage::PgStorage),
    Memory(MemoryStorage),
}

impl StorageBackend {
    /// Connect to PostgreSQL and apply pending migrations.
    #[cfg(feature = "postgres")]
    pub async fn new_postgres(database_url: &str) -> Result<Self, StorageError> {
        Ok(Self::Postgres(crate::pg_storage::PgStorage::new(database_url).await?))
    }

    #[must_use]
    pub fn new_memory() -> Self {
        Self::Memory(MemoryStorage::new())
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            #[cfg(feature = "postgres")]
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }
}

// ── ReportStore ──────────────────────────────────────────────────

#[async_trait]
impl ReportStore for StorageBackend {
    async fn list_reports(
        &self,
        owner_id: &str,
        filter: &ReportFilter,
    ) -> Result<Vec<Report>, StorageError> {
        dispatch!(self, ReportStore, list_reports(owner_id, filter))
    }

    async fn get_report(&self, owner_id: &str, id: &str) -> Result<Option<Report>, StorageError> {
        dispatch!(self, ReportStore, get_report(owner_id, id))
    }

    async fn insert_report(&self, report: &Report) -> Result<(), StorageError> {
        dispatch!(self, ReportStore, insert_report(report))
    }

    async fn replace_report(&self, report: &Report) -> Result<bool, StorageError> {
        dispatch!(self, ReportStore, replace_report(report))
    }

    async fn delete_report(&self, owner_id: &str, id: &str) -> Result<bool, StorageError> {
        dispatch!(self, ReportStore, delete_report(owner_id, id))
    }
}

// ── SummaryStore ─────────────────────────────────────────────────

#[async_trait]
impl SummaryStore for StorageBackend {
    async fn list_summaries(&self, owner_id: &str) -> Result<Vec<Summary>, StorageError> {
        dispatch!(self, SummaryStore, list_summaries(owner_id))
    }

    async fn get_summary(
        &self,
        owner_id: &str,
        period: &MonthPeriod,
    ) -> Result<Option<Summary>, StorageError> {
        dispatch!(self, SummaryStore, get_summary(owner_id, period))
    }

    async fn upsert_summary(
        &self,
        owner_id: &str,
        input: &SummaryInput,
        now: DateTime<Utc>,
    ) -> Result<Summary, StorageError> {
        dispatch!(self, SummaryStore, upsert_summary(owner_id, input, now))
    }
}
