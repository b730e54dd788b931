use serde::{Deserialize, Serialize};

// pub struct for individual audit results
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub numeric_value: Option<f64>,
    #[serde(default)]
    pub details: Option<AuditDetails>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AuditDetails {
    #[serde(default)]
    pub items: Option<Vec<serde_json::Value>>,
}

impl Audit {
    pub fn item_count(&self) -> Option<usize> {
        self.details
            .as_ref()
            .and_then(|d| d.items.as_ref())
            .map(Vec::len)
    }
}
