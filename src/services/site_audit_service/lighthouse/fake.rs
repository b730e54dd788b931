use crate::models::lighthouse::{Audit, AuditDetails, Categories, Category, RawAuditResult};
use crate::services::site_audit_service::lighthouse::{AuditError, AuditRunner};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Canned audit runner for tests and local development.
#[derive(Debug, Default)]
pub struct FakeAuditRunner {
    default: Option<RawAuditResult>,
    per_url: HashMap<String, RawAuditResult>,
    failure: Option<String>,
    delay: Duration,
    calls: AtomicUsize,
}

impl FakeAuditRunner {
    pub fn succeeding(result: RawAuditResult) -> Self {
        Self {
            default: Some(result),
            ..Self::default()
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn with_result_for(mut self, url: impl Into<String>, result: RawAuditResult) -> Self {
        self.per_url.insert(url.into(), result);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuditRunner for FakeAuditRunner {
    async fn run(&self, url: &str) -> Result<RawAuditResult, AuditError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if let Some(message) = &self.failure {
            return Err(AuditError::Failed {
                url: url.to_string(),
                stderr: message.clone(),
            });
        }
        let mut result = self
            .per_url
            .get(url)
            .or(self.default.as_ref())
            .cloned()
            .ok_or_else(|| AuditError::Failed {
                url: url.to_string(),
                stderr: "no canned result".to_string(),
            })?;
        result.requested_url = Some(url.to_string());
        Ok(result)
    }
}

/// Builds an engine result with the given raw scores in [0,1] and the
/// default metric audits filled in.
pub fn sample_result(
    scores: [Option<f64>; 4],
    total_blocking_time_ms: f64,
    total_byte_weight: f64,
    request_count: usize,
) -> RawAuditResult {
    let [performance, accessibility, best_practices, seo] =
        scores.map(|score| Some(Category { score }));

    let mut audits = HashMap::new();
    audits.insert(
        "total-blocking-time".to_string(),
        Audit {
            numeric_value: Some(total_blocking_time_ms),
            ..Audit::default()
        },
    );
    audits.insert(
        "total-byte-weight".to_string(),
        Audit {
            numeric_value: Some(total_byte_weight),
            ..Audit::default()
        },
    );
    audits.insert(
        "network-requests".to_string(),
        Audit {
            details: Some(AuditDetails {
                items: Some(vec![serde_json::json!({}); request_count]),
            }),
            ..Audit::default()
        },
    );

    RawAuditResult {
        categories: Categories {
            performance,
            accessibility,
            best_practices,
            seo,
        },
        audits,
        ..RawAuditResult::default()
    }
}
