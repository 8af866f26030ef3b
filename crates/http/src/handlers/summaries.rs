use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use daily_report_core::{MonthPeriod, Summary, SummaryDraft, SummaryInput};

use crate::api_error::ApiError;
use crate::auth::AuthUser;
use crate::query_types::SaveSummaryRequest;
use crate::AppState;

pub async fn list_summaries(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<Vec<Summary>>, ApiError> {
    Ok(Json(state.summary_service.list(&user.owner_id).await?))
}

pub async fn save_summary(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    body: Result<Json<SaveSummaryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Summary>), ApiError> {
    let Json(req) = body?;
    let period = MonthPeriod::from_json_values(req.month.as_ref(), req.year.as_ref())?;
    let draft = SummaryDraft::new(
        req.activity_summary.unwrap_or_default(),
        req.result_summary.unwrap_or_default(),
    );
    let input = SummaryInput::new(period, draft)?;
    let summary = state.summary_service.upsert(&user.owner_id, input).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<Summary>, ApiError> {
    let Path((year, month)) = path?;
    let period = MonthPeriod::from_query(Some(&month), Some(&year))?
        .ok_or_else(|| ApiError::BadRequest("month and year are required".to_owned()))?;
    Ok(Json(state.summary_service.get(&user.owner_id, period).await?))
}
