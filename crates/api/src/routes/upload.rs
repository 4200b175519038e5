//! Single-file upload to an existing contact.

use axum::{
    Json, Router,
    extract::{Multipart, State, multipart::MultipartRejection},
    routing::post,
};
use serde::Serialize;
use tracing::info;

use crate::form::{FormData, FormFields};
use crate::middleware::AuthUser;
use crate::routes::parse_id;
use crate::{ApiError, AppState};
use dossier_core::contact::Contact;
use dossier_shared::ContactId;

const UPLOAD_FORM: FormFields = FormFields {
    text: &["contactId", "label"],
    files: &["file"],
};

/// Upload response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Fixed success message.
    pub message: &'static str,
    /// Blob key of the stored file.
    pub file_key: String,
    /// Contact after the append.
    pub contact: Contact,
}

/// Creates upload routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/upload", post(upload_file))
}

/// POST /upload - multipart `{file, contactId, label}`.
async fn upload_file(
    State(state): State<AppState>,
    caller: AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let multipart = multipart.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let mut form = FormData::read(multipart, UPLOAD_FORM).await?;

    let mut files = form.files("file");
    let contact_id = form.non_blank("contactId");
    let label = form.document_label("label")?;

    let (Some(file), Some(contact_id), Some(label)) = (files.pop(), contact_id, label) else {
        return Err(ApiError::bad_request(
            "Missing required fields: file, contactId, label",
        ));
    };
    if !files.is_empty() {
        return Err(ApiError::bad_request("Only one file may be uploaded at a time"));
    }
    let contact_id: ContactId = parse_id(&contact_id, "Contact")?;

    let outcome = state
        .contact_attachments()?
        .attach(contact_id, file, label)
        .await?;

    let file_key = outcome
        .attachments
        .first()
        .map(|a| a.key.clone())
        .unwrap_or_default();

    info!(contact_id = %contact_id, user = caller.user_id(), file_key = %file_key, "File uploaded");
    Ok(Json(UploadResponse {
        message: "File uploaded successfully",
        file_key,
        contact: outcome.record,
    }))
}
