//! Doc routes.

use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State, multipart::MultipartRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::form::{FormData, FormFields};
use crate::routes::parse_id;
use crate::{ApiError, AppState};
use dossier_core::access::AccessMode;
use dossier_core::doc::{Doc, DocPatch, NewDoc};
use dossier_shared::{ContactId, DocId};

const DOC_FORM: FormFields = FormFields {
    text: &[
        "doc_title",
        "pb_username",
        "pb_email",
        "labels",
        "notes",
        "contact",
        "label",
    ],
    files: &["files"],
};

/// `?id=` query used by the collection routes.
#[derive(Debug, Deserialize)]
pub struct DocIdQuery {
    /// Doc id.
    pub id: Option<String>,
}

impl DocIdQuery {
    fn require(&self) -> Result<DocId, ApiError> {
        let raw = self
            .id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| ApiError::bad_request("Missing document ID"))?;
        parse_id(raw, "Doc")
    }
}

/// Creates doc routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/docs",
            get(list_docs)
                .post(create_doc)
                .put(update_doc)
                .delete(delete_doc),
        )
        .route("/docs/{id}/content", get(doc_content))
        .route("/docs/{id}/view", get(view_doc))
}

fn parse_contact_ref(raw: Option<String>) -> Result<Option<ContactId>, ApiError> {
    raw.filter(|v| !v.trim().is_empty())
        .map(|v| {
            v.trim()
                .parse()
                .map_err(|_| ApiError::bad_request(format!("contact '{v}' is not a valid id")))
        })
        .transpose()
}

/// GET /docs - every doc, most recently modified first.
async fn list_docs(State(state): State<AppState>) -> Result<Json<Vec<Doc>>, ApiError> {
    Ok(Json(state.docs().list().await?))
}

/// POST /docs - multipart fields plus `files`.
async fn create_doc(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let multipart = multipart.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let mut form = FormData::read(multipart, DOC_FORM).await?;

    let mut input = NewDoc {
        doc_title: form.text("doc_title").unwrap_or_default(),
        pb_username: form.text("pb_username"),
        pb_email: form.text("pb_email"),
        labels: form.labels("labels")?.unwrap_or_default(),
        notes: form.text("notes"),
        contact: parse_contact_ref(form.text("contact"))?,
        documents: Vec::new(),
    };
    let label = form.document_label("label")?.unwrap_or_default();
    let files = form.files("files");

    // Reject bad fields before any blob is written.
    input.clone().validated()?;

    if !files.is_empty() {
        input.documents = state
            .doc_attachments()?
            .store_detached(files, label)
            .await?;
    }

    let doc = state.docs().create(input).await?;
    Ok((StatusCode::CREATED, Json(doc)))
}

/// PUT /docs?id= - field patch, then any `files` are appended.
async fn update_doc(
    State(state): State<AppState>,
    Query(query): Query<DocIdQuery>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Doc>, ApiError> {
    let id = query.require()?;
    let multipart = multipart.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let mut form = FormData::read(multipart, DOC_FORM).await?;

    let patch = DocPatch {
        doc_title: form.text("doc_title"),
        pb_username: form.text("pb_username"),
        pb_email: form.text("pb_email"),
        labels: form.labels("labels")?,
        notes: form.text("notes"),
        contact: parse_contact_ref(form.text("contact"))?,
        documents: None,
    };
    let label = form.document_label("label")?.unwrap_or_default();
    let files = form.files("files");

    if files.is_empty() {
        return Ok(Json(state.docs().update(id, patch).await?));
    }

    // Resolve the blob store before the first write.
    let attachments = state.doc_attachments()?;
    if !patch.is_empty() {
        state.docs().update(id, patch).await?;
    }

    let outcome = attachments.attach_batch(id, files, label).await?;
    Ok(Json(outcome.record))
}

/// DELETE /docs?id=
async fn delete_doc(
    State(state): State<AppState>,
    Query(query): Query<DocIdQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let id = query.require()?;
    state.docs().delete(id).await?;
    Ok(Json(json!({ "message": "Document deleted successfully" })))
}

/// GET /docs/{id}/content - first attachment as plain text.
async fn doc_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: DocId = parse_id(&id, "Doc")?;
    let attachment = state
        .docs()
        .first_attachment(id)
        .await?
        .ok_or_else(|| ApiError::not_found("No file associated with this document"))?;

    let text = state.signed_access()?.read_text(&attachment.key).await?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        text,
    )
        .into_response())
}

/// GET /docs/{id}/view?id= - redirect to a view-mode signed URL of the
/// first attachment. The query id names the doc.
async fn view_doc(
    State(state): State<AppState>,
    Path(_path_id): Path<String>,
    Query(query): Query<DocIdQuery>,
) -> Result<Response, ApiError> {
    let id = query.require()?;
    let attachment = state
        .docs()
        .first_attachment(id)
        .await?
        .ok_or_else(|| ApiError::bad_request("Document has no documents"))?;

    let signed = state
        .signed_access()?
        .issue(&attachment.key, AccessMode::View, None)
        .await?;

    info!(doc_id = %id, "Redirecting to signed view URL");
    Ok((StatusCode::FOUND, [(header::LOCATION, signed.url)]).into_response())
}
