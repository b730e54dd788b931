//! Service configuration, read from the environment (and `.env` via dotenv).

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_AUDIT_TIMEOUT_SECS: u64 = 180;
pub const DEFAULT_MAX_WAIT_FOR_LOAD_MS: u64 = 120_000;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: `{value}` ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Which audit detail entries feed the raw metrics of a report.
///
/// The identifiers belong to the audit engine's output schema, which can
/// change between engine versions, so they are configurable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricMapping {
    /// Audit whose `numericValue` becomes `loadTime` (ms).
    pub load_time: String,
    /// Audit whose `numericValue` becomes `resourceSize` (bytes).
    pub resource_size: String,
    /// Audit whose `details.items` length becomes `requestCount`.
    pub request_count: String,
}

impl Default for MetricMapping {
    fn default() -> Self {
        Self {
            load_time: "total-blocking-time".to_string(),
            resource_size: "total-byte-weight".to_string(),
            request_count: "network-requests".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LighthouseConfig {
    pub bin: String,
    pub chrome_flags: String,
    pub max_wait_for_load_ms: u64,
}

impl Default for LighthouseConfig {
    fn default() -> Self {
        Self {
            bin: "lighthouse".to_string(),
            chrome_flags: "--headless --no-sandbox".to_string(),
            max_wait_for_load_ms: DEFAULT_MAX_WAIT_FOR_LOAD_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Postgres URL. `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub lighthouse: LighthouseConfig,
    pub audit_timeout: Duration,
    pub metric_mapping: MetricMapping,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bind_addr = parse_or(
            "BIND_ADDR",
            get("BIND_ADDR"),
            SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
        )?;

        let db_max_connections = parse_or(
            "DB_MAX_CONNECTIONS",
            get("DB_MAX_CONNECTIONS"),
            DEFAULT_DB_MAX_CONNECTIONS,
        )?;
        if db_max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "DB_MAX_CONNECTIONS",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let timeout_secs = parse_or(
            "AUDIT_TIMEOUT_SECS",
            get("AUDIT_TIMEOUT_SECS"),
            DEFAULT_AUDIT_TIMEOUT_SECS,
        )?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "AUDIT_TIMEOUT_SECS",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let defaults = LighthouseConfig::default();
        let lighthouse = LighthouseConfig {
            bin: get("LIGHTHOUSE_BIN").unwrap_or(defaults.bin),
            chrome_flags: get("CHROME_FLAGS").unwrap_or(defaults.chrome_flags),
            max_wait_for_load_ms: parse_or(
                "MAX_WAIT_FOR_LOAD_MS",
                get("MAX_WAIT_FOR_LOAD_MS"),
                defaults.max_wait_for_load_ms,
            )?,
        };

        let mapping = MetricMapping::default();
        let metric_mapping = MetricMapping {
            load_time: get("LOAD_TIME_AUDIT").unwrap_or(mapping.load_time),
            resource_size: get("RESOURCE_SIZE_AUDIT").unwrap_or(mapping.resource_size),
            request_count: get("REQUEST_COUNT_AUDIT").unwrap_or(mapping.request_count),
        };

        Ok(Self {
            bind_addr,
            database_url: get("DATABASE_URL"),
            db_max_connections,
            lighthouse,
            audit_timeout: Duration::from_secs(timeout_secs),
            metric_mapping,
        })
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}
