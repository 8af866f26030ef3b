use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use daily_report_core::{MonthPeriod, Report, ReportInput, ReportPatch};

use crate::api_error::ApiError;
use crate::auth::AuthUser;
use crate::query_types::PeriodQuery;
use crate::response_types::DeleteReportResponse;
use crate::AppState;

pub async fn list_reports(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> Result<Json<Vec<Report>>, ApiError> {
    let Query(query) = query?;
    let period = MonthPeriod::from_query(query.month.as_deref(), query.year.as_deref())?;
    let reports = state.report_service.list(&user.owner_id, period).await?;
    Ok(Json(reports))
}

pub async fn create_report(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    body: Result<Json<ReportInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Report>), ApiError> {
    let Json(input) = body?;
    let report = state.report_service.create(&user.owner_id, input).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

pub async fn get_report(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Report>, ApiError> {
    Ok(Json(state.report_service.get(&user.owner_id, &id).await?))
}

pub async fn update_report(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
    body: Result<Json<ReportPatch>, JsonRejection>,
) -> Result<Json<Report>, ApiError> {
    let Json(patch) = body?;
    Ok(Json(state.report_service.update(&user.owner_id, &id, patch).await?))
}

pub async fn delete_report(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DeleteReportResponse>, ApiError> {
    state.report_service.delete(&user.owner_id, &id).await?;
    Ok(Json(DeleteReportResponse { message: "report deleted", id }))
}

pub async fn report_text(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<String, ApiError> {
    Ok(state.report_service.report_text(&user.owner_id, &id).await?)
}

pub async fn export_month(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> Result<String, ApiError> {
    let Query(query) = query?;
    let period = MonthPeriod::from_query(query.month.as_deref(), query.year.as_deref())?
        .ok_or_else(|| ApiError::BadRequest("month and year are required".to_owned()))?;
    Ok(state.report_service.monthly_export(&user.owner_id, period).await?)
}
