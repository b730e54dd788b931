use crate::models::lighthouse::audit::Audit;
use crate::models::lighthouse::category::Categories;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The part of one Lighthouse run result this service reads.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawAuditResult {
    #[serde(default)]
    pub requested_url: Option<String>,
    #[serde(default)]
    pub final_url: Option<String>,
    #[serde(default)]
    pub fetch_time: Option<String>,
    #[serde(default)]
    pub lighthouse_version: Option<String>,
    #[serde(default)]
    pub runtime_error: Option<RuntimeError>,
    #[serde(default)]
    pub categories: Categories,
    #[serde(default)]
    pub audits: HashMap<String, Audit>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RuntimeError {
    pub code: String,
    #[serde(default)]
    pub message: String,
}
