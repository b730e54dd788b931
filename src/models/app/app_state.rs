use crate::services::AuditService;

#[derive(Clone)]
pub struct AppState {
    pub service: AuditService,
}
