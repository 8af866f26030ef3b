use async_trait::async_trait;
use chrono::{DateTime, Utc};
use daily_report_core::{MonthPeriod, Summary, SummaryInput};

use crate::error::StorageError;

/// Saved monthly summaries, unique per (owner, month, year).
#[async_trait]
pub trait SummaryStore: Send + Sync {
    /// All of the owner's summaries, newest year/month first.
    async fn list_summaries(&self, owner_id: &str) -> Result<Vec<Summary>, StorageError>;

    /// The owner's summary for one period.
    async fn get_summary(
        &self,
        owner_id: &str,
        period: &MonthPeriod,
    ) -> Result<Option<Summary>, StorageError>;

    /// Create or overwrite the owner's summary for `input.period`.
    ///
    /// An overwrite keeps the original id and `created_at`.
    async fn upsert_summary(
        &self,
        owner_id: &str,
        input: &SummaryInput,
        now: DateTime<Utc>,
    ) -> Result<Summary, StorageError>;
}
