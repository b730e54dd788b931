use crate::db::StoreError;
use crate::models::ErrorBody;
use crate::services::AuditError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Every way a submit or list can fail at the service boundary.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Audit(#[from] AuditError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CheckError {
    /// Short label for logs; clients only ever see the message.
    pub fn kind(&self) -> &'static str {
        match self {
            CheckError::BadRequest(_) | CheckError::InvalidUrl(_) => "validation",
            CheckError::Audit(AuditError::Timeout(_)) => "timeout",
            CheckError::Audit(_) => "audit",
            CheckError::Store(_) => "store",
        }
    }
}

impl IntoResponse for CheckError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
