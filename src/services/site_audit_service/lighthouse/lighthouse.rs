use crate::config::LighthouseConfig;
use crate::models::lighthouse::{AuditCategory, RawAuditResult};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::process::Stdio;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::process::Command;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("failed to launch {bin}: {source}")]
    Launch {
        bin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Lighthouse failed for {url}: {stderr}")]
    Failed { url: String, stderr: String },

    #[error("Lighthouse could not audit {url}: {code} {message}")]
    Runtime {
        url: String,
        code: String,
        message: String,
    },

    #[error("unreadable Lighthouse output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("audit timed out after {0:?}")]
    Timeout(Duration),
}

/// Runs one page-quality audit for one URL.
#[async_trait]
pub trait AuditRunner: Send + Sync {
    async fn run(&self, url: &str) -> Result<RawAuditResult, AuditError>;
}

/// Drives the Lighthouse CLI. Every call gets its own CLI process, which
/// launches and tears down its own headless browser.
#[derive(Debug, Clone, Default)]
pub struct LighthouseRunner {
    config: LighthouseConfig,
}

impl LighthouseRunner {
    pub fn new(config: LighthouseConfig) -> Self {
        Self { config }
    }

    pub fn args(&self, url: &str) -> Vec<String> {
        let categories = AuditCategory::ALL
            .iter()
            .map(|c| c.lighthouse_id())
            .collect::<Vec<_>>()
            .join(",");

        vec![
            url.to_string(),
            "--output=json".to_string(),
            "--output-path=stdout".to_string(),
            "--quiet".to_string(),
            "--no-enable-error-reporting".to_string(),
            format!("--only-categories={}", categories),
            format!("--chrome-flags={}", self.config.chrome_flags),
            format!("--max-wait-for-load={}", self.config.max_wait_for_load_ms),
        ]
    }
}

#[async_trait]
impl AuditRunner for LighthouseRunner {
    async fn run(&self, url: &str) -> Result<RawAuditResult, AuditError> {
        let started = Instant::now();
        debug!("Launching {} for {}", self.config.bin, url);

        // Dropping the future (timeout) kills the CLI and its browser.
        let child = Command::new(&self.config.bin)
            .args(self.args(url))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| AuditError::Launch {
                bin: self.config.bin.clone(),
                source,
            })?;

        let output = child
            .wait_with_output()
            .await
            .map_err(|source| AuditError::Launch {
                bin: self.config.bin.clone(),
                source,
            })?;

        if !output.status.success() {
            warn!("Lighthouse exited with {} for {}", output.status, url);
            return Err(AuditError::Failed {
                url: url.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let raw = parse_output(url, &output.stdout)?;
        info!(
            "Lighthouse finished {} in {:.1}s",
            url,
            started.elapsed().as_secs_f64()
        );
        Ok(raw)
    }
}

/// Parses CLI stdout and turns an engine-reported runtime error into a failure.
pub fn parse_output(url: &str, stdout: &[u8]) -> Result<RawAuditResult, AuditError> {
    let raw: RawAuditResult = serde_json::from_slice(stdout)?;
    if let Some(err) = &raw.runtime_error {
        return Err(AuditError::Runtime {
            url: url.to_string(),
            code: err.code.clone(),
            message: err.message.clone(),
        });
    }
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_request_the_four_categories_headless() {
        let runner = LighthouseRunner::default();
        let args = runner.args("https://example.com");

        assert_eq!(args[0], "https://example.com");
        assert!(args.contains(&"--output=json".to_string()));
        assert!(args.contains(&"--output-path=stdout".to_string()));
        assert!(args.contains(
            &"--only-categories=performance,accessibility,best-practices,seo".to_string()
        ));
        assert!(args.contains(&"--chrome-flags=--headless --no-sandbox".to_string()));
        assert!(args.contains(&"--max-wait-for-load=120000".to_string()));
    }

    #[test]
    fn runtime_error_in_output_is_a_failure() {
        let stdout = br#"{"runtimeError":{"code":"FAILED_DOCUMENT_REQUEST","message":"net::ERR_NAME_NOT_RESOLVED"},"categories":{"performance":{"score":null}},"audits":{}}"#;
        let err = parse_output("https://nope.invalid", stdout).unwrap_err();
        assert!(matches!(err, AuditError::Runtime { ref code, .. } if code == "FAILED_DOCUMENT_REQUEST"));
    }

    #[test]
    fn timeout_message_keeps_sub_second_precision() {
        let err = AuditError::Timeout(Duration::from_millis(250));
        assert_eq!(err.to_string(), "audit timed out after 250ms");
        let err = AuditError::Timeout(Duration::from_secs(180));
        assert_eq!(err.to_string(), "audit timed out after 180s");
    }

    #[test]
    fn garbage_output_is_a_parse_error() {
        let err = parse_output("https://example.com", b"Lighthouse crashed").unwrap_err();
        assert!(matches!(err, AuditError::Parse(_)));
    }

    #[tokio::test]
    async fn missing_binary_is_a_launch_error() {
        let runner = LighthouseRunner::new(LighthouseConfig {
            bin: "lighttrack-no-such-lighthouse-binary".to_string(),
            ..LighthouseConfig::default()
        });
        let err = runner.run("https://example.com").await.unwrap_err();
        assert!(matches!(err, AuditError::Launch { .. }));
    }
}
