//! Doc service implementation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dossier_shared::DocId;
use tracing::info;

use super::types::{Doc, DocPatch, NewDoc, ValidDoc};
use crate::attachment::Attachment;
use crate::record::RecordError;

/// Repository trait for doc persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait DocRepository: Send + Sync {
    /// Insert a validated doc and return it with its assigned id.
    fn insert(
        &self,
        input: ValidDoc,
        at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Doc, RecordError>> + Send;

    /// Find doc by ID.
    fn find_by_id(
        &self,
        id: DocId,
    ) -> impl std::future::Future<Output = Result<Option<Doc>, RecordError>> + Send;

    /// List every doc, most recently modified first.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<Doc>, RecordError>> + Send;

    /// Merge a validated patch into the stored doc.
    ///
    /// Returns `None` if the doc does not exist.
    fn update(
        &self,
        id: DocId,
        patch: DocPatch,
        at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Option<Doc>, RecordError>> + Send;

    /// Delete a doc, returning the removed record.
    fn delete(
        &self,
        id: DocId,
    ) -> impl std::future::Future<Output = Result<Option<Doc>, RecordError>> + Send;
}

/// Doc service.
pub struct DocService<R: DocRepository> {
    repo: Arc<R>,
}

impl<R: DocRepository> DocService<R> {
    /// Create a new doc service.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Create a doc.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the title or contact reference is missing.
    pub async fn create(&self, input: NewDoc) -> Result<Doc, RecordError> {
        let input = input.validated()?;
        let doc = self.repo.insert(input, Utc::now()).await?;
        info!(doc_id = %doc.id, contact_id = %doc.contact, "Doc created");
        Ok(doc)
    }

    /// Get a doc by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no doc has this id.
    pub async fn get(&self, id: DocId) -> Result<Doc, RecordError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| RecordError::doc_not_found(id))
    }

    /// List every doc.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn list(&self) -> Result<Vec<Doc>, RecordError> {
        self.repo.list().await
    }

    /// Apply a partial update.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the doc does not exist, or a validation error
    /// for a blanked title.
    pub async fn update(&self, id: DocId, patch: DocPatch) -> Result<Doc, RecordError> {
        let patch = patch.validated()?;
        let doc = self
            .repo
            .update(id, patch, Utc::now())
            .await?
            .ok_or_else(|| RecordError::doc_not_found(id))?;
        info!(doc_id = %id, "Doc updated");
        Ok(doc)
    }

    /// Delete a doc and return the removed record.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the doc does not exist.
    pub async fn delete(&self, id: DocId) -> Result<Doc, RecordError> {
        let doc = self
            .repo
            .delete(id)
            .await?
            .ok_or_else(|| RecordError::doc_not_found(id))?;
        info!(doc_id = %id, "Doc deleted");
        Ok(doc)
    }

    /// First attachment of a doc, if it has any.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the doc does not exist.
    pub async fn first_attachment(&self, id: DocId) -> Result<Option<Attachment>, RecordError> {
        let doc = self.get(id).await?;
        Ok(doc.documents.into_iter().next())
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory doc repository for tests.
    #[derive(Default)]
    pub(crate) struct MockDocRepository {
        docs: Mutex<HashMap<DocId, Doc>>,
    }

    impl DocRepository for MockDocRepository {
        async fn insert(&self, input: ValidDoc, at: DateTime<Utc>) -> Result<Doc, RecordError> {
            let doc = Doc {
                id: DocId::new(),
                doc_title: input.doc_title,
                pb_username: input.pb_username,
                pb_email: input.pb_email,
                labels: input.labels,
                notes: input.notes,
                documents: input.documents,
                contact: input.contact,
                created_at: at,
                updated_at: at,
            };
            self.docs.lock().unwrap().insert(doc.id, doc.clone());
            Ok(doc)
        }

        async fn find_by_id(&self, id: DocId) -> Result<Option<Doc>, RecordError> {
            Ok(self.docs.lock().unwrap().get(&id).cloned())
        }

        async fn list(&self) -> Result<Vec<Doc>, RecordError> {
            let mut docs: Vec<Doc> = self.docs.lock().unwrap().values().cloned().collect();
            docs.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
            Ok(docs)
        }

        async fn update(
            &self,
            id: DocId,
            patch: DocPatch,
            at: DateTime<Utc>,
        ) -> Result<Option<Doc>, RecordError> {
            let mut docs = self.docs.lock().unwrap();
            Ok(docs.get_mut(&id).map(|doc| {
                patch.apply_to(doc);
                doc.updated_at = at;
                doc.clone()
            }))
        }

        async fn delete(&self, id: DocId) -> Result<Option<Doc>, RecordError> {
            Ok(self.docs.lock().unwrap().remove(&id))
        }
    }
}
