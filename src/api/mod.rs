// src/api/mod.rs

pub mod dashboard;
pub mod lighthouse;

pub use dashboard::{dashboard_handler, dashboard_submit_handler};
pub use lighthouse::{check_handler, list_reports_handler, report_stats_handler};

use crate::models::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(dashboard_handler).post(dashboard_submit_handler))
        .route("/api/check", post(check_handler))
        .route("/api/reports", get(list_reports_handler))
        .route("/api/reports/stats", get(report_stats_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
