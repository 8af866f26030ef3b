//! HTTP API server for daily-report.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]

pub mod api_error;
pub mod auth;
mod handlers;
mod query_types;
mod response_types;

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use daily_report_service::{ReportService, SummaryService};

pub use auth::{issue_token, validate_token, AuthConfig, AuthUser, Claims, TokenError};
pub use response_types::VersionResponse;

/// Shared application state for all HTTP handlers.
pub struct AppState {
    pub report_service: Arc<ReportService>,
    pub summary_service: Arc<SummaryService>,
    /// Verifies bearer session tokens.
    pub auth: AuthConfig,
    /// Browser origin allowed by CORS; no CORS layer when `None`.
    pub cors_origin: Option<HeaderValue>,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = state.cors_origin.clone().map(cors_layer);

    let router = Router::new()
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route(
            "/api/reports",
            get(handlers::reports::list_reports).post(handlers::reports::create_report),
        )
        .route("/api/reports/export", get(handlers::reports::export_month))
        .route(
            "/api/reports/{id}",
            get(handlers::reports::get_report)
                .put(handlers::reports::update_report)
                .delete(handlers::reports::delete_report),
        )
        .route("/api/reports/{id}/text", get(handlers::reports::report_text))
        .route(
            "/api/summaries",
            get(handlers::summaries::list_summaries).post(handlers::summaries::save_summary),
        )
        .route("/api/summaries/{year}/{month}", get(handlers::summaries::get_summary))
        .route("/api/summarize", post(handlers::summarize::summarize))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    match cors {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

fn cors_layer(origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(3600))
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}
