//! Request/query types (Deserialize)

use serde::Deserialize;
use serde_json::Value;

/// `?month=&year=` on report listing and export.
#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    pub month: Option<String>,
    pub year: Option<String>,
}

/// Body of `POST /api/summarize`. Month and year may be numbers or numeric strings.
#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub month: Option<Value>,
    #[serde(default)]
    pub year: Option<Value>,
}

/// Body of `POST /api/summaries`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSummaryRequest {
    #[serde(default)]
    pub month: Option<Value>,
    #[serde(default)]
    pub year: Option<Value>,
    #[serde(default)]
    pub activity_summary: Option<String>,
    #[serde(default)]
    pub result_summary: Option<String>,
}
