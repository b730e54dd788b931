use crate::models::lighthouse::AuditCategory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A normalized audit run that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    pub url: String,
    pub performance: f64,
    pub accessibility: f64,
    pub best_practices: f64,
    pub seo: f64,
    /// Milliseconds.
    pub load_time: f64,
    /// Bytes.
    pub resource_size: f64,
    pub request_count: i64,
}

/// One persisted audit run. Never updated after it is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StoredReport {
    pub id: Uuid,
    pub url: String,
    pub performance: f64,
    pub accessibility: f64,
    pub best_practices: f64,
    pub seo: f64,
    pub load_time: f64,
    pub resource_size: f64,
    pub request_count: i64,
    #[sqlx(rename = "created_at")]
    pub timestamp: DateTime<Utc>,
}

impl StoredReport {
    pub fn new(id: Uuid, timestamp: DateTime<Utc>, report: NewReport) -> Self {
        Self {
            id,
            url: report.url,
            performance: report.performance,
            accessibility: report.accessibility,
            best_practices: report.best_practices,
            seo: report.seo,
            load_time: report.load_time,
            resource_size: report.resource_size,
            request_count: report.request_count,
            timestamp,
        }
    }

    /// Percentage score in [0,100] for one category.
    pub fn score(&self, category: AuditCategory) -> f64 {
        match category {
            AuditCategory::Performance => self.performance,
            AuditCategory::Accessibility => self.accessibility,
            AuditCategory::BestPractices => self.best_practices,
            AuditCategory::Seo => self.seo,
        }
    }
}
