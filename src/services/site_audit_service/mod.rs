// src/services/site_audit_service/mod.rs

pub mod check;
pub mod compute;
pub mod lighthouse;
pub mod normalize;

pub use check::AuditService;
pub use compute::{compute_score_stats, summarize};
pub use lighthouse::{AuditError, AuditRunner, FakeAuditRunner, LighthouseRunner};
pub use normalize::normalize;
