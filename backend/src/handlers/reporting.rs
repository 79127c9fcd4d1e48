//! Report handlers

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};

use crate::error::AppResult;
use crate::services::reporting::{BaggingReportInput, ReportingService, RoastingReportInput};
use crate::AppState;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Roasting report as plain text
pub async fn roasting_report(
    State(state): State<AppState>,
    Json(input): Json<RoastingReportInput>,
) -> impl IntoResponse {
    let service = ReportingService::new(state.config.reports.clone());
    ([(header::CONTENT_TYPE, TEXT_PLAIN)], service.roasting_report(&input))
}

/// Roasting rows as a CSV download
pub async fn roasting_report_csv(
    Json(input): Json<RoastingReportInput>,
) -> AppResult<impl IntoResponse> {
    let csv = ReportingService::export_to_csv(&input.results)?;
    let disposition = format!(
        "attachment; filename=\"roasting-{}.csv\"",
        input.session_date.format("%Y-%m-%d")
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}

/// Bagging report as plain text
pub async fn bagging_report(
    State(state): State<AppState>,
    Json(input): Json<BaggingReportInput>,
) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.config.reports.clone());
    let report = service.bagging_report(&input)?;
    Ok(([(header::CONTENT_TYPE, TEXT_PLAIN)], report))
}
