use crate::error::CheckError;
use crate::models::{AppState, CheckRequest, HistoryStats, StoredReport};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use log::info;
use std::sync::Arc;

/// POST /api/check
pub async fn check_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> Result<Json<StoredReport>, CheckError> {
    let Json(request) = payload.map_err(|rejection| CheckError::BadRequest(rejection.body_text()))?;
    info!("Started check handler for url: {:?}", request.url);

    let report = state.service.submit(request.url.as_deref()).await?;
    Ok(Json(report))
}

/// GET /api/reports
pub async fn list_reports_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StoredReport>>, CheckError> {
    let reports = state.service.list().await?;
    Ok(Json(reports))
}

/// GET /api/reports/stats
pub async fn report_stats_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HistoryStats>, CheckError> {
    let stats = state.service.stats().await?;
    Ok(Json(stats))
}
