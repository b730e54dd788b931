use crate::config::MetricMapping;
use crate::models::lighthouse::{AuditCategory, RawAuditResult};
use crate::models::NewReport;

/// Maps one raw engine result onto the persisted report shape.
///
/// Category scores go from [0,1] to [0,100]; metrics are read from the
/// audits named in `mapping`. Anything absent, unscored, or not a finite
/// number becomes 0, and out-of-range inputs are clamped.
pub fn normalize(url: &str, raw: &RawAuditResult, mapping: &MetricMapping) -> NewReport {
    let score = |category| percent(raw.categories.score(category));
    let numeric = |audit_id: &str| {
        non_negative(
            raw.audits
                .get(audit_id)
                .and_then(|audit| audit.numeric_value),
        )
    };

    let request_count = raw
        .audits
        .get(&mapping.request_count)
        .and_then(|audit| audit.item_count())
        .unwrap_or(0);

    NewReport {
        url: url.to_string(),
        performance: score(AuditCategory::Performance),
        accessibility: score(AuditCategory::Accessibility),
        best_practices: score(AuditCategory::BestPractices),
        seo: score(AuditCategory::Seo),
        load_time: numeric(&mapping.load_time),
        resource_size: numeric(&mapping.resource_size),
        request_count: i64::try_from(request_count).unwrap_or(i64::MAX),
    }
}

fn percent(score: Option<f64>) -> f64 {
    match score {
        Some(s) if s.is_finite() => s.clamp(0.0, 1.0) * 100.0,
        _ => 0.0,
    }
}

fn non_negative(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}
