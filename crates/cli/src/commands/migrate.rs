//! Applies the PostgreSQL schema.
//!
//! Connecting runs every idempotent migration, so this is safe to repeat.

use daily_report_storage::StorageBackend;

use crate::config::get_database_url;

pub(crate) async fn run() -> anyhow::Result<()> {
    let url = get_database_url()?;
    let backend = StorageBackend::new_postgres(&url).await?;
    tracing::info!(backend = backend.kind(), "schema is up to date");
    println!("Migrations applied.");
    Ok(())
}
