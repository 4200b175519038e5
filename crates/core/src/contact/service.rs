//! Contact service implementation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dossier_shared::ContactId;
use tracing::info;

use super::types::{Contact, ContactFilter, ContactPatch, ContactQuery, NewContact};
use crate::record::RecordError;

/// Repository trait for contact persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait ContactRepository: Send + Sync {
    /// Insert a validated contact and return it with its assigned id.
    fn insert(
        &self,
        input: NewContact,
        at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Contact, RecordError>> + Send;

    /// Find contact by ID.
    fn find_by_id(
        &self,
        id: ContactId,
    ) -> impl std::future::Future<Output = Result<Option<Contact>, RecordError>> + Send;

    /// List contacts matching a filter, most recently modified first.
    fn list(
        &self,
        filter: ContactFilter,
    ) -> impl std::future::Future<Output = Result<Vec<Contact>, RecordError>> + Send;

    /// Merge a validated patch into the stored contact.
    ///
    /// Returns `None` if the contact does not exist.
    fn update(
        &self,
        id: ContactId,
        patch: ContactPatch,
        at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Option<Contact>, RecordError>> + Send;

    /// Delete a contact, returning the removed record.
    fn delete(
        &self,
        id: ContactId,
    ) -> impl std::future::Future<Output = Result<Option<Contact>, RecordError>> + Send;

    /// Check whether an email belongs to a contact other than `exclude`.
    fn email_taken(
        &self,
        email: &str,
        exclude: Option<ContactId>,
    ) -> impl std::future::Future<Output = Result<bool, RecordError>> + Send;
}

/// Contact service.
pub struct ContactService<R: ContactRepository> {
    repo: Arc<R>,
}

impl<R: ContactRepository> ContactService<R> {
    /// Create a new contact service.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Create a contact.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a required field is missing, the email
    /// is malformed, or another contact already uses the email.
    pub async fn create(&self, input: NewContact) -> Result<Contact, RecordError> {
        let input = input.validated()?;

        if self.repo.email_taken(&input.email, None).await? {
            return Err(RecordError::duplicate_email(&input.email));
        }

        let contact = self.repo.insert(input, Utc::now()).await?;
        info!(contact_id = %contact.id, "Contact created");
        Ok(contact)
    }

    /// Get a contact by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no contact has this id.
    pub async fn get(&self, id: ContactId) -> Result<Contact, RecordError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| RecordError::contact_not_found(id))
    }

    /// List contacts using query precedence: name pair, then email, then all.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn list(&self, query: ContactQuery) -> Result<Vec<Contact>, RecordError> {
        self.repo.list(ContactFilter::from_query(query)).await
    }

    /// Apply a partial update.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the contact does not exist, or a validation
    /// error for a blanked required field or an email already in use.
    pub async fn update(
        &self,
        id: ContactId,
        patch: ContactPatch,
    ) -> Result<Contact, RecordError> {
        let patch = patch.validated()?;

        if let Some(email) = &patch.email {
            // An unknown id is NotFound even when the email is taken.
            self.get(id).await?;
            if self.repo.email_taken(email, Some(id)).await? {
                return Err(RecordError::duplicate_email(email));
            }
        }

        let contact = self
            .repo
            .update(id, patch, Utc::now())
            .await?
            .ok_or_else(|| RecordError::contact_not_found(id))?;
        info!(contact_id = %id, "Contact updated");
        Ok(contact)
    }

    /// Delete a contact and return the removed record.
    ///
    /// Docs referencing the contact are left in place.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the contact does not exist.
    pub async fn delete(&self, id: ContactId) -> Result<Contact, RecordError> {
        let contact = self
            .repo
            .delete(id)
            .await?
            .ok_or_else(|| RecordError::contact_not_found(id))?;
        info!(contact_id = %id, "Contact deleted");
        Ok(contact)
    }
}
