use crate::models::{AuditCategory, CategoriesStats, HistoryStats, ScoreStats, StoredReport};

pub fn compute_score_stats(scores: &mut [f64]) -> Option<ScoreStats> {
    if scores.is_empty() {
        return None;
    }
    scores.sort_by(|a, b| a.total_cmp(b));

    let count = scores.len();
    let sum: f64 = scores.iter().sum();
    let mean = sum / count as f64;

    let variance = scores.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / count as f64;
    let std_dev = variance.sqrt();

    let median = if count % 2 == 0 {
        (scores[count / 2 - 1] + scores[count / 2]) / 2.0
    } else {
        scores[count / 2]
    };

    Some(ScoreStats {
        min: scores[0],
        max: scores[count - 1],
        median,
        std_dev,
    })
}

pub fn summarize(reports: &[StoredReport]) -> HistoryStats {
    let stat_for = |category: AuditCategory| {
        let mut scores: Vec<f64> = reports.iter().map(|r| r.score(category)).collect();
        compute_score_stats(&mut scores)
    };

    // First seen wins on ties.
    let mut best: Option<&StoredReport> = None;
    let mut worst: Option<&StoredReport> = None;
    for report in reports {
        if best.map_or(true, |b| report.performance > b.performance) {
            best = Some(report);
        }
        if worst.map_or(true, |w| report.performance < w.performance) {
            worst = Some(report);
        }
    }

    HistoryStats {
        count: reports.len(),
        category_stats: CategoriesStats {
            performance: stat_for(AuditCategory::Performance),
            accessibility: stat_for(AuditCategory::Accessibility),
            best_practices: stat_for(AuditCategory::BestPractices),
            seo: stat_for(AuditCategory::Seo),
        },
        best_performance_url: best.map(|r| r.url.clone()),
        worst_performance_url: worst.map(|r| r.url.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewReport;
    use chrono::Utc;
    use uuid::Uuid;

    fn stored(url: &str, performance: f64, seo: f64) -> StoredReport {
        StoredReport::new(
            Uuid::new_v4(),
            Utc::now(),
            NewReport {
                url: url.to_string(),
                performance,
                accessibility: 100.0,
                best_practices: 80.0,
                seo,
                load_time: 0.0,
                resource_size: 0.0,
                request_count: 0,
            },
        )
    }

    #[test]
    fn score_stats_for_odd_and_even_counts() {
        let stats = compute_score_stats(&mut [90.0, 10.0, 50.0]).unwrap();
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 90.0);
        assert_eq!(stats.median, 50.0);

        let stats = compute_score_stats(&mut [40.0, 60.0, 20.0, 80.0]).unwrap();
        assert_eq!(stats.median, 50.0);
        assert!((stats.std_dev - 500f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn no_scores_no_stats() {
        assert!(compute_score_stats(&mut []).is_none());
        let summary = summarize(&[]);
        assert_eq!(summary.count, 0);
        assert!(summary.category_stats.performance.is_none());
        assert!(summary.best_performance_url.is_none());
    }

    #[test]
    fn summary_tracks_best_and_worst_pages() {
        let reports = vec![
            stored("https://b.test", 60.0, 70.0),
            stored("https://a.test", 95.0, 90.0),
            stored("https://c.test", 12.0, 50.0),
            stored("https://d.test", 95.0, 10.0),
        ];
        let summary = summarize(&reports);

        assert_eq!(summary.count, 4);
        assert_eq!(summary.best_performance_url.as_deref(), Some("https://a.test"));
        assert_eq!(summary.worst_performance_url.as_deref(), Some("https://c.test"));
        let seo = summary.category_stats.seo.unwrap();
        assert_eq!(seo.min, 10.0);
        assert_eq!(seo.max, 90.0);
        assert_eq!(seo.median, 60.0);
        assert_eq!(summary.category_stats.accessibility.unwrap().std_dev, 0.0);
    }
}
