use async_trait::async_trait;
use chrono::{DateTime, Utc};
use daily_report_core::{Report, ReportStatus};

use crate::error::StorageError;

/// Ordering of listed reports by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    /// Newest first.
    #[default]
    Descending,
}

impl SortOrder {
    pub(crate) fn as_sql(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// Filter for listing one owner's reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub status: Option<ReportStatus>,
    /// Inclusive creation-time range.
    pub created_between: Option<(DateTime<Utc>, DateTime<Utc>)>,
    pub order: SortOrder,
}

impl ReportFilter {
    /// Every report, newest first.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// `Complete` reports created inside `[start, end]`.
    #[must_use]
    pub fn completed_between(start: DateTime<Utc>, end: DateTime<Utc>, order: SortOrder) -> Self {
        Self { status: Some(ReportStatus::Complete), created_between: Some((start, end)), order }
    }

    #[must_use]
    pub fn matches(&self, report: &Report) -> bool {
        let status_ok = self.status.is_none_or(|s| s == report.status);
        let range_ok = self
            .created_between
            .is_none_or(|(start, end)| report.created_at >= start && report.created_at <= end);
        status_ok && range_ok
    }
}

/// CRUD operations on reports, always scoped by owner.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// List the owner's reports matching `filter`, ordered by creation time.
    async fn list_reports(
        &self,
        owner_id: &str,
        filter: &ReportFilter,
    ) -> Result<Vec<Report>, StorageError>;

    /// Get a report by id; `None` if absent or owned by someone else.
    async fn get_report(&self, owner_id: &str, id: &str) -> Result<Option<Report>, StorageError>;

    /// Insert a new report.
    async fn insert_report(&self, report: &Report) -> Result<(), StorageError>;

    /// Replace the stored report with the same id and owner.
    /// Returns `false` if no such report exists.
    async fn replace_report(&self, report: &Report) -> Result<bool, StorageError>;

    /// Delete a report. Returns `true` if a row owned by `owner_id` was deleted.
    async fn delete_report(&self, owner_id: &str, id: &str) -> Result<bool, StorageError>;
}
