pub mod fake;
#[allow(clippy::module_inception)]
pub mod lighthouse;

pub use fake::{sample_result, FakeAuditRunner};
pub use lighthouse::{parse_output, AuditError, AuditRunner, LighthouseRunner};
