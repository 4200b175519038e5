//! Contact routes.

use axum::{
    Json, Router,
    extract::{FromRequest, Multipart, Path, Query, Request, State, rejection::JsonRejection},
    http::{StatusCode, header::CONTENT_TYPE},
    response::IntoResponse,
    routing::get,
};
use tracing::info;

use crate::form::{FormData, FormFields};
use crate::middleware::AuthUser;
use crate::routes::parse_id;
use crate::{ApiError, AppState};
use dossier_core::contact::{Address, Contact, ContactPatch, ContactQuery, NewContact};
use dossier_shared::ContactId;

const CONTACT_FORM: FormFields = FormFields {
    text: &[
        "firstName",
        "lastName",
        "email",
        "address",
        "phoneNumber",
        "altPhone",
        "labels",
        "notes",
        "label",
    ],
    files: &["files"],
};

/// Creates contact routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/contacts", get(list_contacts).post(create_contact))
        .route(
            "/contacts/{id}",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
}

fn is_multipart(request: &Request) -> bool {
    request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"))
}

/// POST /contacts - JSON body, or multipart fields plus `files`.
async fn create_contact(
    State(state): State<AppState>,
    caller: AuthUser,
    request: Request,
) -> Result<impl IntoResponse, ApiError> {
    let contact = if is_multipart(&request) {
        let multipart = Multipart::from_request(request, &state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        create_from_form(&state, multipart).await?
    } else {
        let Json(input) = Json::<NewContact>::from_request(request, &state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        state.contacts().create(input).await?
    };

    info!(contact_id = %contact.id, user = caller.user_id(), "Contact created via API");
    Ok((StatusCode::CREATED, Json(contact)))
}

async fn create_from_form(state: &AppState, multipart: Multipart) -> Result<Contact, ApiError> {
    let mut form = FormData::read(multipart, CONTACT_FORM).await?;

    let mut input = NewContact {
        first_name: form.text("firstName").unwrap_or_default(),
        last_name: form.text("lastName").unwrap_or_default(),
        email: form.text("email").unwrap_or_default(),
        address: form.json::<Address>("address")?.unwrap_or_default(),
        phone_number: form.text("phoneNumber"),
        alt_phone: form.text("altPhone"),
        labels: form.labels("labels")?.unwrap_or_default(),
        notes: form.text("notes"),
        documents: Vec::new(),
    };
    let label = form.document_label("label")?.unwrap_or_default();
    let files = form.files("files");

    // Reject bad fields before any blob is written.
    input.clone().validated()?;

    if !files.is_empty() {
        input.documents = state
            .contact_attachments()?
            .store_detached(files, label)
            .await?;
    }

    Ok(state.contacts().create(input).await?)
}

/// GET /contacts?firstName=&lastName=&email=
async fn list_contacts(
    State(state): State<AppState>,
    Query(query): Query<ContactQuery>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    Ok(Json(state.contacts().list(query).await?))
}

/// GET /contacts/{id}
async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Contact>, ApiError> {
    let id: ContactId = parse_id(&id, "Contact")?;
    Ok(Json(state.contacts().get(id).await?))
}

/// PUT /contacts/{id} - partial update.
async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ContactPatch>, JsonRejection>,
) -> Result<Json<Contact>, ApiError> {
    let id: ContactId = parse_id(&id, "Contact")?;
    let Json(patch) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;
    Ok(Json(state.contacts().update(id, patch).await?))
}

/// DELETE /contacts/{id} - returns the removed contact.
async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Contact>, ApiError> {
    let id: ContactId = parse_id(&id, "Contact")?;
    Ok(Json(state.contacts().delete(id).await?))
}
