//! Website quality checker: runs a Lighthouse audit for a submitted URL,
//! keeps every normalized result, and serves a JSON API plus a dashboard
//! with score cards and history charts.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use config::{Config, ConfigError, MetricMapping};
pub use db::{MemoryReportStore, PgReportStore, ReportStore, StoreError};
pub use error::CheckError;
pub use models::{AppState, NewReport, StoredReport};
pub use services::{AuditRunner, AuditService, FakeAuditRunner, LighthouseRunner};

use log::warn;
use std::sync::Arc;

/// Opens the store `config` asks for: Postgres when a database URL is set,
/// otherwise an in-memory store that forgets everything on exit.
pub async fn open_store(config: &Config) -> Result<Arc<dyn ReportStore>, StoreError> {
    match &config.database_url {
        Some(url) => {
            let store = PgReportStore::open(url, config.db_max_connections).await?;
            Ok(Arc::new(store))
        }
        None => {
            warn!("DATABASE_URL is not set; reports are kept in memory only");
            Ok(Arc::new(MemoryReportStore::new()))
        }
    }
}

/// The full HTTP application around one service.
pub fn app(service: AuditService) -> axum::Router {
    api::router(Arc::new(AppState { service }))
}
