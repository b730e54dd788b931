use crate::dashboard::Dashboard;
use crate::error::CheckError;
use crate::models::{AppState, AuditCategory, CheckForm, DashboardParams};
use crate::services::summarize;
use axum::{
    extract::{rejection::FormRejection, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use log::warn;
use std::sync::Arc;

fn metric_or_default(raw: Option<&str>) -> AuditCategory {
    raw.and_then(|m| m.parse().ok()).unwrap_or_default()
}

async fn load_dashboard(state: &AppState, metric: AuditCategory) -> Dashboard {
    let listed = state.service.list().await.map_err(|e| e.to_string());
    let mut dashboard = Dashboard::loaded(listed);
    dashboard.select_metric(metric);
    dashboard
}

fn render(dashboard: &Dashboard) -> Html<String> {
    let stats = summarize(dashboard.reports());
    Html(dashboard.render(Some(&stats)))
}

/// GET /
pub async fn dashboard_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DashboardParams>,
) -> Html<String> {
    let dashboard = load_dashboard(&state, metric_or_default(params.metric.as_deref())).await;
    render(&dashboard)
}

/// POST /
///
/// Success redirects back to the page so it lists again; failure shows the
/// message above the reports that were already there.
pub async fn dashboard_submit_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Form<CheckForm>, FormRejection>,
) -> Response {
    let form = match payload {
        Ok(Form(form)) => form,
        Err(rejection) => {
            let err = CheckError::BadRequest(rejection.body_text());
            warn!("Rejected dashboard submit ({}): {}", err.kind(), err);
            let mut dashboard = load_dashboard(&state, AuditCategory::default()).await;
            dashboard.begin_submit("");
            dashboard.finish_submit(Err(err.to_string()));
            return render(&dashboard).into_response();
        }
    };

    let metric = metric_or_default(form.metric.as_deref());
    let mut dashboard = load_dashboard(&state, metric).await;
    dashboard.begin_submit(&form.url);

    match state.service.submit(Some(&form.url)).await {
        Ok(_) => Redirect::to(&format!("/?metric={}", metric.key())).into_response(),
        Err(err) => {
            dashboard.finish_submit(Err(err.to_string()));
            render(&dashboard).into_response()
        }
    }
}
