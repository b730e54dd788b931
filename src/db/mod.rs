// src/db/mod.rs

pub mod memory;
pub mod postgres;

pub use memory::MemoryReportStore;
pub use postgres::PgReportStore;

use crate::models::{NewReport, StoredReport};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("report store is closed")]
    Closed,
}

/// Append-only collection of audit reports.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Assigns id and timestamp, persists, and returns the stored record.
    async fn save(&self, report: NewReport) -> Result<StoredReport, StoreError>;

    /// Every stored report, newest first.
    async fn list_all(&self) -> Result<Vec<StoredReport>, StoreError>;

    /// Releases the underlying resources. Later calls fail with `Closed`.
    async fn close(&self);
}

/// Hands out strictly increasing timestamps, even when the wall clock
/// does not advance between two saves.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last: Mutex<Option<DateTime<Utc>>>,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.next_after(Utc::now())
    }

    // Postgres keeps microseconds, so that is the smallest step.
    fn next_after(&self, wall: DateTime<Utc>) -> DateTime<Utc> {
        let wall = truncate_to_micros(wall);
        let mut last = self.last.lock();
        let next = match *last {
            Some(prev) if wall <= prev => prev + Duration::microseconds(1),
            _ => wall,
        };
        *last = Some(next);
        next
    }
}

fn truncate_to_micros(ts: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_micros(ts.timestamp_micros()).unwrap_or(ts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_never_repeats_a_timestamp() {
        let clock = MonotonicClock::new();
        let frozen = Utc::now();

        let a = clock.next_after(frozen);
        let b = clock.next_after(frozen);
        let c = clock.next_after(frozen - Duration::seconds(5));

        assert!(a < b);
        assert!(b < c);
        assert_eq!(b - a, Duration::microseconds(1));
    }

    #[test]
    fn clock_follows_wall_time_when_it_advances() {
        let clock = MonotonicClock::new();
        let start = Utc::now();
        clock.next_after(start);
        let later = start + Duration::seconds(1);
        assert_eq!(clock.next_after(later), truncate_to_micros(later));
    }
}
