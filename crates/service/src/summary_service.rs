use std::sync::Arc;

use chrono::Utc;
use daily_report_core::{MonthPeriod, Summary, SummaryDraft, SummaryInput};
use daily_report_llm::LlmClient;
use daily_report_storage::traits::SummaryStore;
use daily_report_storage::StorageBackend;

use crate::report_service::ReportService;
use crate::ServiceError;

/// Monthly summary generation and the saved-summary store.
pub struct SummaryService {
    storage: Arc<StorageBackend>,
    llm: Arc<LlmClient>,
    report_service: Arc<ReportService>,
}

impl SummaryService {
    #[must_use]
    pub const fn new(
        storage: Arc<StorageBackend>,
        llm: Arc<LlmClient>,
        report_service: Arc<ReportService>,
    ) -> Self {
        Self { storage, llm, report_service }
    }

    /// Produce the activity and result narratives for the owner's completed
    /// reports of `period`. Nothing is persisted.
    pub async fn generate(
        &self,
        owner_id: &str,
        period: MonthPeriod,
    ) -> Result<SummaryDraft, ServiceError> {
        let reports = self.report_service.completed_reports(owner_id, &period).await?;
        if reports.is_empty() {
            tracing::info!(
                owner_id,
                %period,
                "no completed reports, returning placeholder summary"
            );
        } else {
            tracing::info!(
                owner_id,
                %period,
                reports = reports.len(),
                "generating monthly summary"
            );
        }
        Ok(self.llm.generate_monthly_summary(&reports, self.report_service.offset()).await?)
    }

    pub async fn list(&self, owner_id: &str) -> Result<Vec<Summary>, ServiceError> {
        Ok(self.storage.list_summaries(owner_id).await?)
    }

    pub async fn get(&self, owner_id: &str, period: MonthPeriod) -> Result<Summary, ServiceError> {
        self.storage.get_summary(owner_id, &period).await?.ok_or_else(|| ServiceError::NotFound {
            entity: "summary",
            id: period.to_string(),
        })
    }

    /// Create or overwrite the owner's summary for the input's period.
    pub async fn upsert(
        &self,
        owner_id: &str,
        input: SummaryInput,
    ) -> Result<Summary, ServiceError> {
        let summary = self.storage.upsert_summary(owner_id, &input, Utc::now()).await?;
        tracing::info!(summary_id = %summary.id, owner_id, period = %input.period, "summary saved");
        Ok(summary)
    }
}
