//! Environment-driven configuration for the binary.

use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use chrono::FixedOffset;
use daily_report_core::{env_non_empty, env_parse_with_default};
use daily_report_llm::{RetryPolicy, DEFAULT_BASE_URL, DEFAULT_MODEL};

const DEFAULT_RETRY_BASE_MS: u64 = 1000;
const LLM_MAX_ATTEMPTS: u32 = 3;

pub(crate) fn get_database_url() -> Result<String> {
    env_non_empty("DATABASE_URL").ok_or_else(|| {
        anyhow::anyhow!("DATABASE_URL must be set (or run `serve --in-memory`)")
    })
}

pub(crate) fn get_auth_secret() -> Result<String> {
    env_non_empty("DAILY_REPORT_AUTH_SECRET")
        .ok_or_else(|| anyhow::anyhow!("DAILY_REPORT_AUTH_SECRET environment variable must be set"))
}

pub(crate) fn get_api_key() -> Result<String> {
    env_non_empty("DAILY_REPORT_LLM_API_KEY")
        .ok_or_else(|| anyhow::anyhow!("DAILY_REPORT_LLM_API_KEY environment variable must be set"))
}

pub(crate) fn get_base_url() -> String {
    env_non_empty("DAILY_REPORT_LLM_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_owned())
}

pub(crate) fn get_model() -> String {
    env_non_empty("DAILY_REPORT_LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_owned())
}

pub(crate) fn get_retry_policy() -> RetryPolicy {
    let base_ms = env_parse_with_default("DAILY_REPORT_LLM_RETRY_BASE_MS", DEFAULT_RETRY_BASE_MS);
    RetryPolicy::new(LLM_MAX_ATTEMPTS, Duration::from_millis(base_ms))
}

/// Calendar offset for month bounds and rendered dates.
pub(crate) fn get_utc_offset() -> Result<FixedOffset> {
    let minutes: i32 = env_parse_with_default("DAILY_REPORT_UTC_OFFSET_MINUTES", 0);
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .with_context(|| format!("DAILY_REPORT_UTC_OFFSET_MINUTES out of range: {minutes}"))
}

pub(crate) fn get_cors_origin() -> Result<Option<HeaderValue>> {
    env_non_empty("DAILY_REPORT_CORS_ORIGIN")
        .map(|origin| {
            HeaderValue::from_str(&origin)
                .with_context(|| format!("invalid DAILY_REPORT_CORS_ORIGIN: {origin}"))
        })
        .transpose()
}
