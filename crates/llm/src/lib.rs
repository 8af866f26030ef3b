//! Chat-completions client and monthly summary generation.
//!
//! Talks to any OpenAI-compatible `chat/completions` endpoint (Gemini's by
//! default) with a linear-backoff retry policy driven by typed error classes.

pub mod ai_types;
mod client;
pub mod error;
mod monthly_summary;
mod retry;

#[cfg(test)]
mod monthly_summary_tests;

pub use client::{truncate, LlmClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use error::{ErrorClass, LlmError};
pub use monthly_summary::{
    build_monthly_summary_prompt, no_reports_draft, parse_summary_sections, render_report_blocks,
    ACTIVITY_FALLBACK, ACTIVITY_HEADER, NO_REPORTS_ACTIVITY, NO_REPORTS_RESULT, RESULT_FALLBACK,
    RESULT_HEADER, SECTION_SEPARATOR,
};
pub use retry::RetryPolicy;
