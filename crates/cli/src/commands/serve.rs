use anyhow::Result;
use daily_report_http::{create_router, AppState, AuthConfig};
use daily_report_llm::LlmClient;
use daily_report_service::{ReportService, SummaryService};
use daily_report_storage::StorageBackend;
use std::sync::Arc;

use crate::config::{
    get_api_key, get_auth_secret, get_base_url, get_cors_origin, get_database_url, get_model,
    get_retry_policy, get_utc_offset,
};

pub(crate) async fn run(port: u16, host: String, in_memory: bool) -> Result<()> {
    let auth = AuthConfig::new(get_auth_secret()?);
    let offset = get_utc_offset()?;
    let cors_origin = get_cors_origin()?;

    let storage = if in_memory {
        tracing::warn!("Using in-memory storage, data is lost on exit");
        Arc::new(StorageBackend::new_memory())
    } else {
        Arc::new(StorageBackend::new_postgres(&get_database_url()?).await?)
    };

    let llm = LlmClient::new(get_api_key()?, get_base_url())?
        .with_model(get_model())
        .with_retry_policy(get_retry_policy());
    tracing::info!(model = llm.model(), base_url = llm.base_url(), "LLM client configured");

    let report_service = Arc::new(ReportService::new(Arc::clone(&storage), offset));
    let summary_service =
        Arc::new(SummaryService::new(storage, Arc::new(llm), Arc::clone(&report_service)));

    let state = Arc::new(AppState { report_service, summary_service, auth, cors_origin });

    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!(%offset, "Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
