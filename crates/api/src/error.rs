//! JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{error, warn};

use dossier_core::access::AccessError;
use dossier_core::attachment::AttachmentError;
use dossier_core::record::RecordError;
use dossier_core::storage::StorageError;
use dossier_shared::AppError;

/// Handler error rendered as `{"error": <code>, "details": <message>}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    details: String,
    /// Full message for logs. Not sent to the caller.
    internal: String,
}

impl ApiError {
    fn new(status: StatusCode, code: &'static str, details: impl Into<String>) -> Self {
        let details = details.into();
        Self {
            status,
            code,
            internal: details.clone(),
            details,
        }
    }

    /// 400 with a caller-facing message.
    #[must_use]
    pub fn bad_request(details: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "validation_error", details)
    }

    /// 401 with a specific code (`missing_token`, `token_expired`, ...).
    #[must_use]
    pub fn unauthorized(code: &'static str, details: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, code, details)
    }

    /// 404 with a caller-facing message.
    #[must_use]
    pub fn not_found(details: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", details)
    }

    /// 413 for a body over the configured limit.
    #[must_use]
    pub fn payload_too_large(details: impl Into<String>) -> Self {
        Self::new(StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large", details)
    }

    /// 500 for a missing blob store configuration.
    #[must_use]
    pub fn storage_not_configured() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "storage_not_configured",
            "Blob storage is not configured",
        )
    }

    /// HTTP status of this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Error code sent in the body.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self {
            status,
            code: err.error_code(),
            details: err.details(),
            internal: err.to_string(),
        }
    }
}

impl From<RecordError> for ApiError {
    fn from(err: RecordError) -> Self {
        AppError::from(err).into()
    }
}

impl From<AttachmentError> for ApiError {
    fn from(err: AttachmentError) -> Self {
        AppError::from(err).into()
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        AppError::from(err).into()
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotConfigured => Self::storage_not_configured(),
            other => AppError::from(other).into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, code = self.code, error = %self.internal, "Request failed");
        } else {
            warn!(status = %self.status, code = self.code, error = %self.internal, "Request rejected");
        }

        (
            self.status,
            Json(json!({
                "error": self.code,
                "details": self.details,
            })),
        )
            .into_response()
    }
}
