//! In-process storage backend.
//!
//! Used by `serve --in-memory` and by the service and HTTP tests. Data lives
//! only as long as the process.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use daily_report_core::{MonthPeriod, Report, Summary, SummaryInput};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StorageError;
use crate::traits::{ReportFilter, ReportStore, SortOrder, SummaryStore};

type SummaryKey = (String, i32, u32);

#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    reports: Arc<RwLock<HashMap<String, Report>>>,
    summaries: Arc<RwLock<HashMap<SummaryKey, Summary>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn summary_key(owner_id: &str, period: &MonthPeriod) -> SummaryKey {
    (owner_id.to_owned(), period.year(), period.month())
}

#[async_trait]
impl ReportStore for MemoryStorage {
    async fn list_reports(
        &self,
        owner_id: &str,
        filter: &ReportFilter,
    ) -> Result<Vec<Report>, StorageError> {
        let reports = self.reports.read().await;
        let mut found: Vec<Report> = reports
            .values()
            .filter(|r| r.owner_id == owner_id && filter.matches(r))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        if filter.order == SortOrder::Descending {
            found.reverse();
        }
        Ok(found)
    }

    async fn get_report(&self, owner_id: &str, id: &str) -> Result<Option<Report>, StorageError> {
        let reports = self.reports.read().await;
        Ok(reports.get(id).filter(|r| r.owner_id == owner_id).cloned())
    }

    async fn insert_report(&self, report: &Report) -> Result<(), StorageError> {
        let mut reports = self.reports.write().await;
        if reports.contains_key(&report.id) {
            return Err(StorageError::Duplicate(format!("report {}", report.id)));
        }
        reports.insert(report.id.clone(), report.clone());
        Ok(())
    }

    async fn replace_report(&self, report: &Report) -> Result<bool, StorageError> {
        let mut reports = self.reports.write().await;
        match reports.get_mut(&report.id) {
            Some(existing) if existing.owner_id == report.owner_id => {
                *existing = report.clone();
                Ok(true)
            },
            _ => Ok(false),
        }
    }

    async fn delete_report(&self, owner_id: &str, id: &str) -> Result<bool, StorageError> {
        let mut reports = self.reports.write().await;
        if reports.get(id).is_some_and(|r| r.owner_id == owner_id) {
            reports.remove(id);
            return Ok(true);
        }
        Ok(false)
    }
}

#[async_trait]
impl SummaryStore for MemoryStorage {
    async fn list_summaries(&self, owner_id: &str) -> Result<Vec<Summary>, StorageError> {
        let summaries = self.summaries.read().await;
        let mut found: Vec<Summary> =
            summaries.values().filter(|s| s.owner_id == owner_id).cloned().collect();
        found.sort_by(|a, b| b.year.cmp(&a.year).then_with(|| b.month.cmp(&a.month)));
        Ok(found)
    }

    async fn get_summary(
        &self,
        owner_id: &str,
        period: &MonthPeriod,
    ) -> Result<Option<Summary>, StorageError> {
        let summaries = self.summaries.read().await;
        Ok(summaries.get(&summary_key(owner_id, period)).cloned())
    }

    async fn upsert_summary(
        &self,
        owner_id: &str,
        input: &SummaryInput,
        now: DateTime<Utc>,
    ) -> Result<Summary, StorageError> {
        let mut summaries = self.summaries.write().await;
        let summary = summaries
            .entry(summary_key(owner_id, &input.period))
            .and_modify(|existing| {
                existing.activity_summary.clone_from(&input.draft.activity_summary);
                existing.result_summary.clone_from(&input.draft.result_summary);
                existing.updated_at = now;
            })
            .or_insert_with(|| Summary {
                id: Uuid::new_v4().to_string(),
                owner_id: owner_id.to_owned(),
                month: input.period.month(),
                year: input.period.year(),
                activity_summary: input.draft.activity_summary.clone(),
                result_summary: input.draft.result_summary.clone(),
                created_at: now,
                updated_at: now,
            });
        Ok(summary.clone())
    }
}
