use std::sync::Arc;

use chrono::{FixedOffset, Utc};
use daily_report_core::{
    render_monthly_export, render_report_text, MonthPeriod, Report, ReportInput, ReportPatch,
};
use daily_report_storage::traits::{ReportFilter, ReportStore, SortOrder};
use daily_report_storage::StorageBackend;

use crate::ServiceError;

/// Owner-scoped report CRUD and the plain-text renderings.
pub struct ReportService {
    storage: Arc<StorageBackend>,
    offset: FixedOffset,
}

impl ReportService {
    /// `offset` is the calendar offset used for month bounds and dates.
    #[must_use]
    pub const fn new(storage: Arc<StorageBackend>, offset: FixedOffset) -> Self {
        Self { storage, offset }
    }

    /// All of the owner's reports, or only the `Complete` ones of `period`.
    /// Newest first either way.
    pub async fn list(
        &self,
        owner_id: &str,
        period: Option<MonthPeriod>,
    ) -> Result<Vec<Report>, ServiceError> {
        let filter = match period {
            Some(period) => self.completed_in(&period, SortOrder::Descending),
            None => ReportFilter::all(),
        };
        Ok(self.storage.list_reports(owner_id, &filter).await?)
    }

    pub async fn get(&self, owner_id: &str, id: &str) -> Result<Report, ServiceError> {
        self.storage
            .get_report(owner_id, id)
            .await?
            .ok_or_else(|| ServiceError::report_not_found(id))
    }

    pub async fn create(&self, owner_id: &str, input: ReportInput) -> Result<Report, ServiceError> {
        let report = Report::create(owner_id, input, Utc::now())?;
        self.storage.insert_report(&report).await?;
        tracing::info!(report_id = %report.id, owner_id, status = %report.status, "report created");
        Ok(report)
    }

    /// Merges `patch` into the owner's report. The merged record must still
    /// satisfy the done/todo rules for its status.
    pub async fn update(
        &self,
        owner_id: &str,
        id: &str,
        patch: ReportPatch,
    ) -> Result<Report, ServiceError> {
        let mut report = self.get(owner_id, id).await?;
        report.apply_patch(patch, Utc::now())?;
        if !self.storage.replace_report(&report).await? {
            // Deleted between read and write.
            return Err(ServiceError::report_not_found(id));
        }
        tracing::info!(report_id = %id, owner_id, "report updated");
        Ok(report)
    }

    pub async fn delete(&self, owner_id: &str, id: &str) -> Result<(), ServiceError> {
        if !self.storage.delete_report(owner_id, id).await? {
            return Err(ServiceError::report_not_found(id));
        }
        tracing::info!(report_id = %id, owner_id, "report deleted");
        Ok(())
    }

    pub async fn report_text(&self, owner_id: &str, id: &str) -> Result<String, ServiceError> {
        let report = self.get(owner_id, id).await?;
        Ok(render_report_text(&report))
    }

    /// The month's `Complete` reports, oldest first, as one text document.
    pub async fn monthly_export(
        &self,
        owner_id: &str,
        period: MonthPeriod,
    ) -> Result<String, ServiceError> {
        let reports = self.completed_reports(owner_id, &period).await?;
        Ok(render_monthly_export(&reports, self.offset))
    }

    /// The month's `Complete` reports, oldest first.
    pub(crate) async fn completed_reports(
        &self,
        owner_id: &str,
        period: &MonthPeriod,
    ) -> Result<Vec<Report>, ServiceError> {
        let filter = self.completed_in(period, SortOrder::Ascending);
        Ok(self.storage.list_reports(owner_id, &filter).await?)
    }

    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    fn completed_in(&self, period: &MonthPeriod, order: SortOrder) -> ReportFilter {
        let (start, end) = period.bounds(self.offset);
        ReportFilter::completed_between(start, end, order)
    }
}
