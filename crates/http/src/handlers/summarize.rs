use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use daily_report_core::{MonthPeriod, SummaryDraft};

use crate::api_error::ApiError;
use crate::auth::AuthUser;
use crate::query_types::SummarizeRequest;
use crate::AppState;

/// Generate the month's narratives. The result is not saved.
pub async fn summarize(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    body: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Result<Json<SummaryDraft>, ApiError> {
    let Json(req) = body?;
    let period = MonthPeriod::from_json_values(req.month.as_ref(), req.year.as_ref())?;
    let draft = state.summary_service.generate(&user.owner_id, period).await?;
    Ok(Json(draft))
}
