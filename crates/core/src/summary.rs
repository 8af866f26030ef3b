use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::period::MonthPeriod;

/// A saved monthly narrative summary. Unique per (owner, month, year).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub id: String,
    pub owner_id: String,
    pub month: u32,
    pub year: i32,
    pub activity_summary: String,
    pub result_summary: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The two generated narratives, before (optionally) being saved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDraft {
    pub activity_summary: String,
    pub result_summary: String,
}

impl SummaryDraft {
    pub fn new(activity_summary: impl Into<String>, result_summary: impl Into<String>) -> Self {
        Self { activity_summary: activity_summary.into(), result_summary: result_summary.into() }
    }
}

/// Validated upsert payload for a saved summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryInput {
    pub period: MonthPeriod,
    pub draft: SummaryDraft,
}

impl SummaryInput {
    pub fn new(period: MonthPeriod, draft: SummaryDraft) -> DomainResult<Self> {
        let activity_summary = draft.activity_summary.trim();
        let result_summary = draft.result_summary.trim();
        if activity_summary.is_empty() {
            return Err(DomainError::InvalidSummary("activitySummary is required".to_owned()));
        }
        if result_summary.is_empty() {
            return Err(DomainError::InvalidSummary("resultSummary is required".to_owned()));
        }
        Ok(Self { period, draft: SummaryDraft::new(activity_summary, result_summary) })
    }
}
