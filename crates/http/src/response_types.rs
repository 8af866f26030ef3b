//! Response types (Serialize)

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DeleteReportResponse {
    pub message: &'static str,
    pub id: String,
}

#[derive(Debug, Serialize)]
#[non_exhaustive]
pub struct VersionResponse {
    pub version: &'static str,
}
