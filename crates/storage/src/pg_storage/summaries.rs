//! SummaryStore implementation for PgStorage.

use super::*;

use crate::traits::SummaryStore;
use async_trait::async_trait;
use daily_report_core::{MonthPeriod, SummaryInput};

#[async_trait]
impl SummaryStore for PgStorage {
    async fn list_summaries(&self, owner_id: &str) -> Result<Vec<Summary>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {SUMMARY_COLUMNS} FROM summaries WHERE owner_id = $1
             ORDER BY year DESC, month DESC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_summary).collect()
    }

    async fn get_summary(
        &self,
        owner_id: &str,
        period: &MonthPeriod,
    ) -> Result<Option<Summary>, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT {SUMMARY_COLUMNS} FROM summaries
             WHERE owner_id = $1 AND month = $2 AND year = $3"
        ))
        .bind(owner_id)
        .bind(month_to_i32(period))
        .bind(period.year())
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| row_to_summary(&r)).transpose()
    }

    async fn upsert_summary(
        &self,
        owner_id: &str,
        input: &SummaryInput,
        now: DateTime<Utc>,
    ) -> Result<Summary, StorageError> {
        let row = sqlx::query(&format!(
            "INSERT INTO summaries ({SUMMARY_COLUMNS})
             VALUES ($1,$2,$3,$4,$5,$6,$7,$7)
             ON CONFLICT (owner_id, month, year) DO UPDATE SET
               activity_summary = EXCLUDED.activity_summary,
               result_summary = EXCLUDED.result_summary,
               updated_at = EXCLUDED.updated_at
             RETURNING {SUMMARY_COLUMNS}"
        ))
        .bind(uuid::Uuid::new_v4().to_string())
        .bind(owner_id)
        .bind(month_to_i32(&input.period))
        .bind(input.period.year())
        .bind(&input.draft.activity_summary)
        .bind(&input.draft.result_summary)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        row_to_summary(&row)
    }
}

// `MonthPeriod` guarantees 1..=12.
fn month_to_i32(period: &MonthPeriod) -> i32 {
    i32::try_from(period.month()).unwrap_or(i32::MAX)
}
