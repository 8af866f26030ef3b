//! PostgreSQL storage backend using sqlx.
//!
//! Split into modular files by domain concern.

mod reports;
mod summaries;

use std::time::Duration;

use crate::error::StorageError;
use chrono::{DateTime, Utc};
use daily_report_core::{
    DoneItem, Report, ReportStatus, Summary, TodoItem, PG_POOL_ACQUIRE_TIMEOUT_SECS,
    PG_POOL_IDLE_TIMEOUT_SECS, PG_POOL_MAX_CONNECTIONS,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use super::pg_migrations::run_pg_migrations;

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        run_pg_migrations(&pool).await.map_err(|e| StorageError::Migration(e.to_string()))?;
        tracing::info!("PgStorage initialized");
        Ok(Self { pool })
    }
}

pub(crate) const REPORT_COLUMNS: &str = "id, owner_id, name, status, done_items, todo_items, \
     documentation_url, created_at, updated_at";

pub(crate) const SUMMARY_COLUMNS: &str =
    "id, owner_id, month, year, activity_summary, result_summary, created_at, updated_at";

pub(crate) fn row_to_report(row: &sqlx::postgres::PgRow) -> Result<Report, StorageError> {
    let id: String = row.try_get("id")?;
    let status: String = row.try_get("status")?;
    let status: ReportStatus = status
        .parse()
        .map_err(|e| StorageError::corruption(format!("status of report {id}"), e))?;
    let done_items: serde_json::Value = row.try_get("done_items")?;
    let todo_items: serde_json::Value = row.try_get("todo_items")?;
    let done_items: Vec<DoneItem> = serde_json::from_value(done_items)
        .map_err(|e| StorageError::corruption(format!("done_items of report {id}"), e))?;
    let todo_items: Vec<TodoItem> = serde_json::from_value(todo_items)
        .map_err(|e| StorageError::corruption(format!("todo_items of report {id}"), e))?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at")?;

    Ok(Report {
        owner_id: row.try_get("owner_id")?,
        name: row.try_get("name")?,
        status,
        done_items,
        todo_items,
        documentation_url: row.try_get("documentation_url")?,
        created_at,
        updated_at,
        id,
    })
}

pub(crate) fn row_to_summary(row: &sqlx::postgres::PgRow) -> Result<Summary, StorageError> {
    let id: String = row.try_get("id")?;
    let month: i32 = row.try_get("month")?;
    let month = u32::try_from(month)
        .map_err(|e| StorageError::corruption(format!("month of summary {id}"), e))?;

    Ok(Summary {
        owner_id: row.try_get("owner_id")?,
        month,
        year: row.try_get("year")?,
        activity_summary: row.try_get("activity_summary")?,
        result_summary: row.try_get("result_summary")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        id,
    })
}
