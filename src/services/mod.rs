pub mod site_audit_service;

pub use site_audit_service::{
    normalize, summarize, AuditError, AuditRunner, AuditService, FakeAuditRunner,
    LighthouseRunner,
};
