use serde::{Deserialize, Serialize};

// Body of POST /api/check
#[derive(Debug, Deserialize, Default)]
pub struct CheckRequest {
    #[serde(default)]
    pub url: Option<String>,
}

// Dashboard form field
#[derive(Debug, Deserialize, Default)]
pub struct CheckForm {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub metric: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct DashboardParams {
    #[serde(default)]
    pub metric: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
