use url::Url;

/// Checks that `raw` is present and shaped like an http(s) URL.
///
/// Reachability is not checked here; the audit itself finds that out.
pub fn validate_url(raw: Option<&str>) -> Result<Url, String> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err("url is required".to_string());
    }

    let parsed = Url::parse(raw).map_err(|e| format!("`{}` is not a valid URL: {}", raw, e))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(format!(
                "`{}` is not a web address (scheme `{}`)",
                raw, other
            ))
        }
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(format!("`{}` has no host", raw));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_web_urls() {
        assert!(validate_url(Some("https://example.com")).is_ok());
        assert!(validate_url(Some("http://localhost:3000/path?q=1")).is_ok());
        assert!(validate_url(Some("  https://example.com/  ")).is_ok());
    }

    #[test]
    fn rejects_missing_and_malformed() {
        assert_eq!(validate_url(None).unwrap_err(), "url is required");
        assert_eq!(validate_url(Some("   ")).unwrap_err(), "url is required");
        assert!(validate_url(Some("example.com")).is_err());
        assert!(validate_url(Some("not a url")).is_err());
        assert!(validate_url(Some("ftp://example.com/file")).is_err());
        assert!(validate_url(Some("mailto:someone@example.com")).is_err());
    }
}
