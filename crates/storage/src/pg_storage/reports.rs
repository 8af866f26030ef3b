//! ReportStore implementation for PgStorage.

use super::*;

use crate::traits::{ReportFilter, ReportStore};
use async_trait::async_trait;

#[async_trait]
impl ReportStore for PgStorage {
    async fn list_reports(
        &self,
        owner_id: &str,
        filter: &ReportFilter,
    ) -> Result<Vec<Report>, StorageError> {
        let order = filter.order.as_sql();
        let (from, to) = filter.created_between.unzip();
        let rows = sqlx::query(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports
             WHERE owner_id = $1
               AND ($2::TEXT IS NULL OR status = $2)
               AND ($3::TIMESTAMPTZ IS NULL OR created_at >= $3)
               AND ($4::TIMESTAMPTZ IS NULL OR created_at <= $4)
             ORDER BY created_at {order}, id {order}"
        ))
        .bind(owner_id)
        .bind(filter.status.map(|s| s.as_str()))
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_report).collect()
    }

    async fn get_report(&self, owner_id: &str, id: &str) -> Result<Option<Report>, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE id = $1 AND owner_id = $2"
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| row_to_report(&r)).transpose()
    }

    async fn insert_report(&self, report: &Report) -> Result<(), StorageError> {
        sqlx::query(&format!(
            "INSERT INTO reports ({REPORT_COLUMNS}) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9)"
        ))
        .bind(&report.id)
        .bind(&report.owner_id)
        .bind(&report.name)
        .bind(report.status.as_str())
        .bind(serde_json::to_value(&report.done_items)?)
        .bind(serde_json::to_value(&report.todo_items)?)
        .bind(&report.documentation_url)
        .bind(report.created_at)
        .bind(report.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn replace_report(&self, report: &Report) -> Result<bool, StorageError> {
        let rows_affected = sqlx::query(
            "UPDATE reports SET
               name = $3, status = $4, done_items = $5, todo_items = $6,
               documentation_url = $7, created_at = $8, updated_at = $9
             WHERE id = $1 AND owner_id = $2",
        )
        .bind(&report.id)
        .bind(&report.owner_id)
        .bind(&report.name)
        .bind(report.status.as_str())
        .bind(serde_json::to_value(&report.done_items)?)
        .bind(serde_json::to_value(&report.todo_items)?)
        .bind(&report.documentation_url)
        .bind(report.created_at)
        .bind(report.updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected();
        Ok(rows_affected > 0)
    }

    async fn delete_report(&self, owner_id: &str, id: &str) -> Result<bool, StorageError> {
        let rows_affected = sqlx::query("DELETE FROM reports WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(rows_affected > 0)
    }
}
