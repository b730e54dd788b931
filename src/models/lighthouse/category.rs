use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// pub struct for each category score
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Category {
    pub score: Option<f64>,
}

// pub struct for Lighthouse categories, keyed the way the CLI emits them
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Categories {
    #[serde(default)]
    pub performance: Option<Category>,
    #[serde(default)]
    pub accessibility: Option<Category>,
    #[serde(default, rename = "best-practices")]
    pub best_practices: Option<Category>,
    #[serde(default)]
    pub seo: Option<Category>,
}

impl Categories {
    /// Raw score in [0,1], `None` when the category is absent or unscored.
    pub fn score(&self, category: AuditCategory) -> Option<f64> {
        let entry = match category {
            AuditCategory::Performance => &self.performance,
            AuditCategory::Accessibility => &self.accessibility,
            AuditCategory::BestPractices => &self.best_practices,
            AuditCategory::Seo => &self.seo,
        };
        entry.as_ref().and_then(|c| c.score)
    }
}

/// The four fixed categories every audit is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum AuditCategory {
    #[default]
    Performance,
    Accessibility,
    BestPractices,
    Seo,
}

impl AuditCategory {
    pub const ALL: [AuditCategory; 4] = [
        AuditCategory::Performance,
        AuditCategory::Accessibility,
        AuditCategory::BestPractices,
        AuditCategory::Seo,
    ];

    /// Identifier used by the audit engine (`--only-categories`).
    pub fn lighthouse_id(self) -> &'static str {
        match self {
            AuditCategory::Performance => "performance",
            AuditCategory::Accessibility => "accessibility",
            AuditCategory::BestPractices => "best-practices",
            AuditCategory::Seo => "seo",
        }
    }

    /// Field name on a persisted report.
    pub fn key(self) -> &'static str {
        match self {
            AuditCategory::Performance => "performance",
            AuditCategory::Accessibility => "accessibility",
            AuditCategory::BestPractices => "bestPractices",
            AuditCategory::Seo => "seo",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AuditCategory::Performance => "Performance",
            AuditCategory::Accessibility => "Accessibility",
            AuditCategory::BestPractices => "Best Practices",
            AuditCategory::Seo => "SEO",
        }
    }

    /// Line colour of the category's history series.
    pub fn color(self) -> &'static str {
        match self {
            AuditCategory::Performance => "#8b5cf6",
            AuditCategory::Accessibility => "#06b6d4",
            AuditCategory::BestPractices => "#3b82f6",
            AuditCategory::Seo => "#6366f1",
        }
    }
}

impl fmt::Display for AuditCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category `{0}`")]
pub struct UnknownCategory(pub String);

impl FromStr for AuditCategory {
    type Err = UnknownCategory;

    // Accepts both the report field name and the engine identifier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AuditCategory::ALL
            .into_iter()
            .find(|c| c.key() == s || c.lighthouse_id() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
