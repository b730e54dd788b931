// src/models/mod.rs

pub mod api;
pub mod app;
pub mod lighthouse;
pub mod report;
pub mod stats;

pub use api::{CheckForm, CheckRequest, DashboardParams, ErrorBody};
pub use app::AppState;
pub use lighthouse::{AuditCategory, RawAuditResult};
pub use report::{NewReport, StoredReport};
pub use stats::{CategoriesStats, HistoryStats, ScoreStats};
