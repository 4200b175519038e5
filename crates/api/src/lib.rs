//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for contacts, docs, uploads and signed file access
//! - Authentication middleware
//! - Multipart form parsing
//! - JSON error responses

pub mod error;
pub mod form;
pub mod middleware;
pub mod routes;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::header::AUTHORIZATION;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;

use dossier_core::access::SignedAccessService;
use dossier_core::attachment::AttachmentService;
use dossier_core::contact::ContactService;
use dossier_core::doc::DocService;
use dossier_core::storage::StorageService;
use dossier_db::{ContactRepository, DocRepository};
use dossier_shared::JwtService;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token verification.
    pub jwt_service: Arc<JwtService>,
    /// Blob storage (optional; blob operations fail per call without it).
    pub storage: Option<Arc<StorageService>>,
    /// Request body limit in bytes.
    pub max_body_bytes: usize,
}

impl AppState {
    fn contact_repo(&self) -> Arc<ContactRepository> {
        Arc::new(ContactRepository::new((*self.db).clone()))
    }

    fn doc_repo(&self) -> Arc<DocRepository> {
        Arc::new(DocRepository::new((*self.db).clone()))
    }

    /// Contact record service.
    pub(crate) fn contacts(&self) -> ContactService<ContactRepository> {
        ContactService::new(self.contact_repo())
    }

    /// Doc record service.
    pub(crate) fn docs(&self) -> DocService<DocRepository> {
        DocService::new(self.doc_repo())
    }

    /// Blob store, or `storage_not_configured`.
    pub(crate) fn storage(&self) -> Result<Arc<StorageService>, ApiError> {
        self.storage
            .clone()
            .ok_or_else(ApiError::storage_not_configured)
    }

    /// Attachment service for contact owners.
    pub(crate) fn contact_attachments(
        &self,
    ) -> Result<AttachmentService<ContactRepository>, ApiError> {
        Ok(AttachmentService::new(self.storage()?, self.contact_repo()))
    }

    /// Attachment service for doc owners.
    pub(crate) fn doc_attachments(&self) -> Result<AttachmentService<DocRepository>, ApiError> {
        Ok(AttachmentService::new(self.storage()?, self.doc_repo()))
    }

    /// Signed access service.
    pub(crate) fn signed_access(&self) -> Result<SignedAccessService, ApiError> {
        Ok(SignedAccessService::new(self.storage()?))
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::api_routes_with_state(state.clone()))
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(SetSensitiveRequestHeadersLayer::new(std::iter::once(
            AUTHORIZATION,
        )))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
