//! Signed file access routes.

use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::post,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ApiError, AppState};
use dossier_core::access::AccessMode;

/// Signed URL request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUrlRequest {
    /// Blob key as stored on the attachment.
    pub file_url: String,
    /// Lifetime in seconds. Defaults to the configured TTL.
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Signed URL response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUrlResponse {
    /// The signed URL.
    pub signed_url: String,
    /// When the URL expires.
    pub expires_at: DateTime<Utc>,
}

/// Creates file access routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/file/{action}", post(sign_file))
}

/// POST /file/{action} - `action` is `download` or `view`.
async fn sign_file(
    State(state): State<AppState>,
    Path(action): Path<String>,
    body: Result<Json<SignedUrlRequest>, JsonRejection>,
) -> Result<Json<SignedUrlResponse>, ApiError> {
    let mode: AccessMode = action.parse()?;
    let Json(request) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let signed = state
        .signed_access()?
        .issue(
            &request.file_url,
            mode,
            request.expires_in.map(Duration::from_secs),
        )
        .await?;

    Ok(Json(SignedUrlResponse {
        signed_url: signed.url,
        expires_at: signed.expires_at,
    }))
}
