use crate::db::{MonotonicClock, ReportStore, StoreError};
use crate::models::{NewReport, StoredReport};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-process store; contents live as long as the process.
#[derive(Default)]
pub struct MemoryReportStore {
    reports: RwLock<Vec<StoredReport>>,
    clock: MonotonicClock,
    closed: AtomicBool,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StoreError::Closed);
        }
        Ok(())
    }
}

#[async_trait]
impl ReportStore for MemoryReportStore {
    async fn save(&self, report: NewReport) -> Result<StoredReport, StoreError> {
        self.ensure_open()?;
        let mut reports = self.reports.write().await;
        let stored = StoredReport::new(Uuid::new_v4(), self.clock.now(), report);
        reports.push(stored.clone());
        Ok(stored)
    }

    async fn list_all(&self) -> Result<Vec<StoredReport>, StoreError> {
        self.ensure_open()?;
        let reports = self.reports.read().await;
        let mut listed = reports.clone();
        listed.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(listed)
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}
