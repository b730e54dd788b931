const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Visual tier of a percentage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Good,
    NeedsImprovement,
    Poor,
}

impl ScoreBand {
    pub const GOOD_THRESHOLD: f64 = 90.0;
    pub const NEEDS_IMPROVEMENT_THRESHOLD: f64 = 50.0;

    pub fn of(score: f64) -> Self {
        if score >= Self::GOOD_THRESHOLD {
            ScoreBand::Good
        } else if score >= Self::NEEDS_IMPROVEMENT_THRESHOLD {
            ScoreBand::NeedsImprovement
        } else {
            ScoreBand::Poor
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            ScoreBand::Good => "good",
            ScoreBand::NeedsImprovement => "needs-improvement",
            ScoreBand::Poor => "poor",
        }
    }
}

pub fn format_score(score: f64) -> String {
    format!("{:.1}%", score)
}

/// Milliseconds shown as seconds.
pub fn format_load_time(load_time_ms: f64) -> String {
    format!("{:.2}s", load_time_ms / 1000.0)
}

/// Bytes shown as megabytes.
pub fn format_resource_size(bytes: f64) -> String {
    format!("{:.2} MB", bytes / BYTES_PER_MB)
}
