use crate::db::{MonotonicClock, ReportStore, StoreError};
use crate::models::{NewReport, StoredReport};
use async_trait::async_trait;
use log::info;
use sqlx::postgres::{PgPool, PgPoolOptions};
use uuid::Uuid;

const CREATE_REPORTS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS reports (
    seq            BIGSERIAL,
    id             UUID PRIMARY KEY,
    url            TEXT NOT NULL,
    performance    DOUBLE PRECISION NOT NULL,
    accessibility  DOUBLE PRECISION NOT NULL,
    best_practices DOUBLE PRECISION NOT NULL,
    seo            DOUBLE PRECISION NOT NULL,
    load_time      DOUBLE PRECISION NOT NULL,
    resource_size  DOUBLE PRECISION NOT NULL,
    request_count  BIGINT NOT NULL,
    created_at     TIMESTAMPTZ NOT NULL
)";

const CREATE_CREATED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS reports_created_at_idx ON reports (created_at DESC, seq DESC)";

const REPORT_COLUMNS: &str = "id, url, performance, accessibility, best_practices, seo, \
     load_time, resource_size, request_count, created_at";

pub struct PgReportStore {
    pool: PgPool,
    clock: MonotonicClock,
}

impl PgReportStore {
    /// Connects and makes sure the `reports` table exists.
    pub async fn open(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Self::with_pool(pool).await
    }

    pub async fn with_pool(pool: PgPool) -> Result<Self, StoreError> {
        sqlx::query(CREATE_REPORTS_TABLE).execute(&pool).await?;
        sqlx::query(CREATE_CREATED_AT_INDEX).execute(&pool).await?;
        info!("Report store ready (postgres)");
        Ok(Self {
            pool,
            clock: MonotonicClock::new(),
        })
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.pool.is_closed() {
            return Err(StoreError::Closed);
        }
        Ok(())
    }
}

#[async_trait]
impl ReportStore for PgReportStore {
    async fn save(&self, report: NewReport) -> Result<StoredReport, StoreError> {
        self.ensure_open()?;
        let sql = format!(
            "INSERT INTO reports ({REPORT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {REPORT_COLUMNS}"
        );
        let stored = sqlx::query_as::<_, StoredReport>(&sql)
            .bind(Uuid::new_v4())
            .bind(&report.url)
            .bind(report.performance)
            .bind(report.accessibility)
            .bind(report.best_practices)
            .bind(report.seo)
            .bind(report.load_time)
            .bind(report.resource_size)
            .bind(report.request_count)
            .bind(self.clock.now())
            .fetch_one(&self.pool)
            .await?;
        Ok(stored)
    }

    async fn list_all(&self) -> Result<Vec<StoredReport>, StoreError> {
        self.ensure_open()?;
        let sql = format!("SELECT {REPORT_COLUMNS} FROM reports ORDER BY created_at DESC, seq DESC");
        let reports = sqlx::query_as::<_, StoredReport>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(reports)
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("Report store closed");
    }
}
