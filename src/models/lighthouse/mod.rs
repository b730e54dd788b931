pub mod audit;
pub mod category;
pub mod report;

pub use audit::{Audit, AuditDetails};
pub use category::{AuditCategory, Categories, Category, UnknownCategory};
pub use report::{RawAuditResult, RuntimeError};
