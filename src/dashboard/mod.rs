//! Dashboard state and presentation.
//!
//! `Dashboard` holds what the page shows: the listed reports (newest
//! first), the active chart metric, the busy flag guarding against
//! overlapping submits, and the last error.

pub mod chart;
pub mod format;
pub mod render;

pub use format::{format_load_time, format_resource_size, format_score, ScoreBand};

use crate::models::{AuditCategory, StoredReport};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Scorecard {
    pub category: AuditCategory,
    pub score: f64,
    pub display: String,
    pub band: ScoreBand,
    /// Width of the proportional bar, 0..=100.
    pub bar_width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricTile {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryPoint {
    pub timestamp: DateTime<Utc>,
    pub url: String,
    pub value: f64,
}

/// One category's scores over time. Only the active metric's series is
/// visible; the page flips visibility without asking for data again.
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySeries {
    pub category: AuditCategory,
    pub visible: bool,
    pub points: Vec<HistoryPoint>,
}

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    reports: Vec<StoredReport>,
    busy: bool,
    error: Option<String>,
    active_metric: AuditCategory,
    url_input: String,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// State after the initial list request.
    pub fn loaded(reports: Result<Vec<StoredReport>, String>) -> Self {
        let mut dashboard = Self::new();
        match reports {
            Ok(reports) => dashboard.reports = reports,
            Err(message) => {
                dashboard.error = Some(format!("Failed to fetch reports: {}", message))
            }
        }
        dashboard
    }

    pub fn reports(&self) -> &[StoredReport] {
        &self.reports
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn active_metric(&self) -> AuditCategory {
        self.active_metric
    }

    pub fn url_input(&self) -> &str {
        &self.url_input
    }

    /// Starts a submit. Returns `false` and changes nothing while another
    /// submit is still pending.
    pub fn begin_submit(&mut self, url: &str) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        self.error = None;
        self.url_input = url.to_string();
        true
    }

    /// Ends a submit. `Ok` carries the refreshed list; `Err` the message to
    /// show next to the form. Prior reports stay on failure.
    pub fn finish_submit(&mut self, outcome: Result<Vec<StoredReport>, String>) {
        self.busy = false;
        match outcome {
            Ok(reports) => {
                self.reports = reports;
                self.error = None;
                self.url_input.clear();
            }
            Err(message) => self.error = Some(message),
        }
    }

    /// Swaps the chart series; the data already held is reused as is.
    pub fn select_metric(&mut self, metric: AuditCategory) {
        self.active_metric = metric;
    }

    pub fn latest(&self) -> Option<&StoredReport> {
        self.reports.first()
    }

    pub fn scorecards(&self) -> Vec<Scorecard> {
        let Some(latest) = self.latest() else {
            return Vec::new();
        };
        AuditCategory::ALL
            .into_iter()
            .map(|category| {
                let score = latest.score(category);
                Scorecard {
                    category,
                    score,
                    display: format_score(score),
                    band: ScoreBand::of(score),
                    bar_width: if score.is_finite() {
                        score.clamp(0.0, 100.0)
                    } else {
                        0.0
                    },
                }
            })
            .collect()
    }

    pub fn metric_tiles(&self) -> Vec<MetricTile> {
        let Some(latest) = self.latest() else {
            return Vec::new();
        };
        vec![
            MetricTile {
                label: "Load Time",
                value: format_load_time(latest.load_time),
            },
            MetricTile {
                label: "Resource Size",
                value: format_resource_size(latest.resource_size),
            },
            MetricTile {
                label: "Request Count",
                value: latest.request_count.to_string(),
            },
        ]
    }

    /// One series per category, each running oldest to newest.
    pub fn history(&self) -> Vec<HistorySeries> {
        AuditCategory::ALL
            .into_iter()
            .map(|category| HistorySeries {
                category,
                visible: category == self.active_metric,
                points: self
                    .reports
                    .iter()
                    .rev()
                    .map(|r| HistoryPoint {
                        timestamp: r.timestamp,
                        url: r.url.clone(),
                        value: r.score(category),
                    })
                    .collect(),
            })
            .collect()
    }
}
