use crate::config::MetricMapping;
use crate::db::ReportStore;
use crate::error::CheckError;
use crate::models::{HistoryStats, StoredReport};
use crate::services::site_audit_service::compute::summarize;
use crate::services::site_audit_service::lighthouse::{AuditError, AuditRunner};
use crate::services::site_audit_service::normalize::normalize;
use crate::utils::validate_url;
use log::{error, info};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Submit and list, wired to one runner and one store.
///
/// Concurrent submits share nothing but the store: each one drives its own
/// audit, with no locking or de-duplication by URL.
#[derive(Clone)]
pub struct AuditService {
    runner: Arc<dyn AuditRunner>,
    store: Arc<dyn ReportStore>,
    mapping: MetricMapping,
    audit_timeout: Duration,
}

impl AuditService {
    pub fn new(
        runner: Arc<dyn AuditRunner>,
        store: Arc<dyn ReportStore>,
        mapping: MetricMapping,
        audit_timeout: Duration,
    ) -> Self {
        Self {
            runner,
            store,
            mapping,
            audit_timeout,
        }
    }

    /// Validates, audits, normalizes and persists. Nothing is stored unless
    /// every step succeeds.
    pub async fn submit(&self, url: Option<&str>) -> Result<StoredReport, CheckError> {
        let result = self.run_submit(url).await;
        if let Err(err) = &result {
            error!(
                "Performance check failed ({}) for {:?}: {}",
                err.kind(),
                url,
                err
            );
        }
        result
    }

    async fn run_submit(&self, url: Option<&str>) -> Result<StoredReport, CheckError> {
        validate_url(url).map_err(CheckError::InvalidUrl)?;
        let url = url.map(str::trim).unwrap_or_default();

        info!("Started performance check for {}", url);
        let started = Instant::now();
        let raw = tokio::time::timeout(self.audit_timeout, self.runner.run(url))
            .await
            .map_err(|_| AuditError::Timeout(self.audit_timeout))??;

        let report = normalize(url, &raw, &self.mapping);
        let stored = self.store.save(report).await?;
        info!(
            "Stored report {} for {} after {:.1}s",
            stored.id,
            url,
            started.elapsed().as_secs_f64()
        );
        Ok(stored)
    }

    pub async fn list(&self) -> Result<Vec<StoredReport>, CheckError> {
        self.store.list_all().await.map_err(|err| {
            error!("Listing reports failed: {}", err);
            CheckError::from(err)
        })
    }

    pub async fn stats(&self) -> Result<HistoryStats, CheckError> {
        let reports = self.list().await?;
        Ok(summarize(&reports))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryReportStore, StoreError};
    use crate::services::site_audit_service::lighthouse::{sample_result, FakeAuditRunner};

    fn service_with(runner: Arc<FakeAuditRunner>, store: Arc<MemoryReportStore>) -> AuditService {
        AuditService::new(
            runner,
            store,
            MetricMapping::default(),
            Duration::from_secs(5),
        )
    }

    fn good_runner() -> FakeAuditRunner {
        FakeAuditRunner::succeeding(sample_result(
            [Some(0.875), Some(1.0), Some(0.91), Some(0.76)],
            1234.0,
            2097152.0,
            42,
        ))
    }

    #[tokio::test]
    async fn submit_persists_the_normalized_report() {
        let store = Arc::new(MemoryReportStore::new());
        let service = service_with(Arc::new(good_runner()), store.clone());

        let stored = service.submit(Some("https://example.com")).await.unwrap();
        assert_eq!(stored.url, "https://example.com");
        assert_eq!(stored.performance, 87.5);
        assert_eq!(stored.request_count, 42);

        let listed = store.list_all().await.unwrap();
        assert_eq!(listed, vec![stored]);
    }

    #[tokio::test]
    async fn invalid_url_never_reaches_the_runner() {
        let runner = Arc::new(good_runner());
        let store = Arc::new(MemoryReportStore::new());
        let service = service_with(runner.clone(), store.clone());

        for bad in [None, Some(""), Some("example dot com")] {
            let err = service.submit(bad).await.unwrap_err();
            assert!(matches!(err, CheckError::InvalidUrl(_)));
        }
        assert_eq!(runner.calls(), 0);
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_audit_writes_nothing() {
        let runner = Arc::new(FakeAuditRunner::failing("net::ERR_NAME_NOT_RESOLVED"));
        let store = Arc::new(MemoryReportStore::new());
        let service = service_with(runner.clone(), store.clone());

        let err = service.submit(Some("https://nope.invalid")).await.unwrap_err();
        assert_eq!(err.kind(), "audit");
        assert!(err.to_string().contains("net::ERR_NAME_NOT_RESOLVED"));
        assert_eq!(runner.calls(), 1);
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn slow_audit_times_out_without_a_report() {
        let runner = Arc::new(good_runner().with_delay(Duration::from_millis(500)));
        let store = Arc::new(MemoryReportStore::new());
        let service = AuditService::new(
            runner,
            store.clone(),
            MetricMapping::default(),
            Duration::from_millis(20),
        );

        let err = service.submit(Some("https://slow.test")).await.unwrap_err();
        assert!(matches!(err, CheckError::Audit(AuditError::Timeout(_))));
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn store_failure_surfaces_on_submit_and_list() {
        let store = Arc::new(MemoryReportStore::new());
        store.close().await;
        let service = service_with(Arc::new(good_runner()), store);

        let err = service.submit(Some("https://example.com")).await.unwrap_err();
        assert!(matches!(err, CheckError::Store(StoreError::Closed)));
        assert!(matches!(
            service.list().await,
            Err(CheckError::Store(StoreError::Closed))
        ));
    }

    #[tokio::test]
    async fn concurrent_submits_stay_independent() {
        let runner = Arc::new(
            FakeAuditRunner::default()
                .with_result_for(
                    "https://fast.test",
                    sample_result([Some(0.99), Some(0.98), Some(0.97), Some(0.96)], 10.0, 1000.0, 7),
                )
                .with_result_for(
                    "https://slow.test",
                    sample_result([Some(0.10), Some(0.20), Some(0.30), Some(0.40)], 9000.0, 5e6, 300),
                )
                .with_delay(Duration::from_millis(30)),
        );
        let store = Arc::new(MemoryReportStore::new());
        let service = service_with(runner.clone(), store.clone());

        let (fast, slow) = tokio::join!(
            service.submit(Some("https://fast.test")),
            service.submit(Some("https://slow.test"))
        );
        let (fast, slow) = (fast.unwrap(), slow.unwrap());

        assert_eq!(runner.calls(), 2);
        assert_ne!(fast.id, slow.id);
        assert_eq!(fast.url, "https://fast.test");
        assert_eq!(fast.request_count, 7);
        assert_eq!(fast.load_time, 10.0);
        assert_eq!(slow.url, "https://slow.test");
        assert_eq!(slow.request_count, 300);
        assert_eq!(slow.resource_size, 5e6);
        assert_eq!(store.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn stats_summarize_the_history() {
        let store = Arc::new(MemoryReportStore::new());
        let service = service_with(Arc::new(good_runner()), store);
        service.submit(Some("https://a.test")).await.unwrap();
        service.submit(Some("https://b.test")).await.unwrap();

        let stats = service.stats().await.unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.category_stats.performance.unwrap().median, 87.5);
    }
}
