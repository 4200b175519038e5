//! Attachment service implementation.

use std::fmt::Display;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::error::AttachmentError;
use super::types::{AttachOutcome, Attachment, DocumentLabel, FileUpload};
use crate::storage::StorageService;

/// A record that can own attachments.
///
/// Implemented by the db crate for both Contacts and Docs so one service
/// handles uploads for either owner.
pub trait AttachmentTarget: Send + Sync {
    /// Owner id type.
    type Id: Copy + Display + Send + Sync;
    /// Record returned after an append.
    type Record: Send;

    /// Owner kind used in error messages.
    const KIND: &'static str;

    /// Check whether the owning record exists.
    fn owner_exists(
        &self,
        id: Self::Id,
    ) -> impl std::future::Future<Output = Result<bool, AttachmentError>> + Send;

    /// Append descriptors to the owner's attachment list in one step and
    /// advance its modification timestamp.
    ///
    /// Returns `None` if the owner disappeared in the meantime.
    fn append_documents(
        &self,
        id: Self::Id,
        documents: Vec<Attachment>,
        at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Option<Self::Record>, AttachmentError>> + Send;
}

/// Attachment service: file payload to blob key to attachment descriptor.
pub struct AttachmentService<T: AttachmentTarget> {
    storage: Arc<StorageService>,
    target: Arc<T>,
}

impl<T: AttachmentTarget> AttachmentService<T> {
    /// Create a new attachment service.
    #[must_use]
    pub fn new(storage: Arc<StorageService>, target: Arc<T>) -> Self {
        Self { storage, target }
    }

    /// Store one file and append its descriptor to the owner.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The owner does not exist (nothing is written)
    /// - The file fails size or MIME checks
    /// - The blob write or the append fails
    pub async fn attach(
        &self,
        owner: T::Id,
        file: FileUpload,
        label: DocumentLabel,
    ) -> Result<AttachOutcome<T::Record>, AttachmentError> {
        self.attach_batch(owner, vec![file], label).await
    }

    /// Store several files and append their descriptors to the owner.
    ///
    /// Files are written in order. If a write fails partway, the files
    /// already written are still appended and the first error is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the owner does not exist, no files were given,
    /// or any write or the append fails.
    pub async fn attach_batch(
        &self,
        owner: T::Id,
        files: Vec<FileUpload>,
        label: DocumentLabel,
    ) -> Result<AttachOutcome<T::Record>, AttachmentError> {
        if files.is_empty() {
            return Err(AttachmentError::validation("at least one file is required"));
        }

        if !self.target.owner_exists(owner).await? {
            return Err(AttachmentError::owner_not_found(T::KIND, owner));
        }

        let owner_segment = owner.to_string();
        let (stored, failure) = self.store_all(Some(&owner_segment), files, label).await;

        if stored.is_empty() {
            return Err(failure
                .unwrap_or_else(|| AttachmentError::validation("at least one file is required")));
        }

        let Some(record) = self
            .target
            .append_documents(owner, stored.clone(), Utc::now())
            .await?
        else {
            warn!(
                owner = %owner,
                orphaned = ?stored.iter().map(|a| a.key.as_str()).collect::<Vec<_>>(),
                "Owner removed before attachments could be recorded"
            );
            return Err(AttachmentError::owner_not_found(T::KIND, owner));
        };

        if let Some(err) = failure {
            warn!(
                owner = %owner,
                attached = stored.len(),
                error = %err,
                "Batch upload stopped partway"
            );
            return Err(err);
        }

        info!(owner = %owner, count = stored.len(), "Attachments recorded");
        Ok(AttachOutcome {
            record,
            attachments: stored,
        })
    }

    /// Store files for a record that does not exist yet.
    ///
    /// Keys carry no owner segment. The caller embeds the returned
    /// descriptors in the record it creates.
    ///
    /// # Errors
    ///
    /// Returns the first write failure. Blobs written before it are left
    /// in the store without an owner.
    pub async fn store_detached(
        &self,
        files: Vec<FileUpload>,
        label: DocumentLabel,
    ) -> Result<Vec<Attachment>, AttachmentError> {
        let (stored, failure) = self.store_all(None, files, label).await;

        match failure {
            Some(err) => {
                if !stored.is_empty() {
                    warn!(
                        orphaned = ?stored.iter().map(|a| a.key.as_str()).collect::<Vec<_>>(),
                        error = %err,
                        "Detached upload failed partway"
                    );
                }
                Err(err)
            }
            None => Ok(stored),
        }
    }

    async fn store_all(
        &self,
        owner: Option<&str>,
        files: Vec<FileUpload>,
        label: DocumentLabel,
    ) -> (Vec<Attachment>, Option<AttachmentError>) {
        let mut stored = Vec::with_capacity(files.len());
        for file in files {
            match self.store_one(owner, file, label).await {
                Ok(attachment) => stored.push(attachment),
                Err(err) => return (stored, Some(err)),
            }
        }
        (stored, None)
    }

    async fn store_one(
        &self,
        owner: Option<&str>,
        file: FileUpload,
        label: DocumentLabel,
    ) -> Result<Attachment, AttachmentError> {
        if file.filename.trim().is_empty() {
            return Err(AttachmentError::validation("file name is required"));
        }

        self.storage.validate_upload(&file.content_type, file.size())?;

        let key = StorageService::generate_storage_key(owner, &file.filename);
        self.storage
            .put(&key, file.body, &file.content_type)
            .await?;

        Ok(Attachment {
            name: file.filename,
            key,
            label,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{StorageConfig, StorageProvider};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use uuid::Uuid;

    /// Mock owner store for testing.
    struct MockTarget {
        owners: Mutex<HashMap<Uuid, Vec<Attachment>>>,
    }

    impl MockTarget {
        fn new() -> Self {
            Self {
                owners: Mutex::new(HashMap::new()),
            }
        }

        fn add_owner(&self, id: Uuid) {
            self.owners.lock().unwrap().insert(id, Vec::new());
        }

        fn documents(&self, id: Uuid) -> Vec<Attachment> {
            self.owners.lock().unwrap().get(&id).cloned().unwrap_or_default()
        }
    }

    impl AttachmentTarget for MockTarget {
        type Id = Uuid;
        type Record = Vec<Attachment>;

        const KIND: &'static str = "Contact";

        async fn owner_exists(&self, id: Uuid) -> Result<bool, AttachmentError> {
            Ok(self.owners.lock().unwrap().contains_key(&id))
        }

        async fn append_documents(
            &self,
            id: Uuid,
            documents: Vec<Attachment>,
            _at: DateTime<Utc>,
        ) -> Result<Option<Vec<Attachment>>, AttachmentError> {
            let mut owners = self.owners.lock().unwrap();
            Ok(owners.get_mut(&id).map(|existing| {
                existing.extend(documents);
                existing.clone()
            }))
        }
    }

    fn storage(max_file_size: u64) -> Arc<StorageService> {
        let config = StorageConfig::new(StorageProvider::memory()).with_max_file_size(max_file_size);
        Arc::new(StorageService::from_config(config).unwrap())
    }

    fn file(name: &str, body: &'static [u8]) -> FileUpload {
        FileUpload::new(name, Some("application/pdf"), body)
    }

    #[tokio::test]
    async fn test_attach_appends_descriptor() {
        let storage = storage(1024);
        let target = Arc::new(MockTarget::new());
        let owner = Uuid::new_v4();
        target.add_owner(owner);
        let service = AttachmentService::new(storage.clone(), target.clone());

        let outcome = service
            .attach(owner, file("1040.pdf", b"%PDF"), DocumentLabel::Tax)
            .await
            .unwrap();

        assert_eq!(outcome.attachments.len(), 1);
        let attachment = &outcome.attachments[0];
        assert_eq!(attachment.name, "1040.pdf");
        assert_eq!(attachment.label, DocumentLabel::Tax);
        assert!(attachment.key.starts_with(&format!("{owner}/")));
        assert_eq!(storage.read(&attachment.key).await.unwrap(), b"%PDF");
        assert_eq!(target.documents(owner), outcome.attachments);
    }

    #[tokio::test]
    async fn test_attach_twice_appends_in_order() {
        let storage = storage(1024);
        let target = Arc::new(MockTarget::new());
        let owner = Uuid::new_v4();
        target.add_owner(owner);
        let service = AttachmentService::new(storage, target.clone());

        service
            .attach(owner, file("a.pdf", b"a"), DocumentLabel::Tax)
            .await
            .unwrap();
        service
            .attach(owner, file("a.pdf", b"b"), DocumentLabel::Business)
            .await
            .unwrap();

        let documents = target.documents(owner);
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].label, DocumentLabel::Tax);
        assert_eq!(documents[1].label, DocumentLabel::Business);
        assert_ne!(documents[0].key, documents[1].key);
    }

    #[tokio::test]
    async fn test_attach_unknown_owner_writes_nothing() {
        let storage = storage(1024);
        let target = Arc::new(MockTarget::new());
        let service = AttachmentService::new(storage.clone(), target);
        let owner = Uuid::new_v4();

        let result = service
            .attach(owner, file("w2.pdf", b"w2"), DocumentLabel::Tax)
            .await;

        assert!(matches!(result, Err(AttachmentError::OwnerNotFound { .. })));
        assert!(storage.list_keys(&format!("{owner}/")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_attach_batch_keeps_files_written_before_failure() {
        let storage = storage(4);
        let target = Arc::new(MockTarget::new());
        let owner = Uuid::new_v4();
        target.add_owner(owner);
        let service = AttachmentService::new(storage, target.clone());

        let result = service
            .attach_batch(
                owner,
                vec![file("small.pdf", b"ok"), file("large.pdf", b"too large")],
                DocumentLabel::Other,
            )
            .await;

        assert!(matches!(
            result,
            Err(AttachmentError::Storage(crate::storage::StorageError::FileTooLarge { .. }))
        ));
        let documents = target.documents(owner);
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].name, "small.pdf");
    }

    #[tokio::test]
    async fn test_attach_batch_requires_files() {
        let target = Arc::new(MockTarget::new());
        let owner = Uuid::new_v4();
        target.add_owner(owner);
        let service = AttachmentService::new(storage(1024), target);

        let result = service
            .attach_batch(owner, Vec::new(), DocumentLabel::Other)
            .await;
        assert!(matches!(result, Err(AttachmentError::Validation(_))));
    }

    #[tokio::test]
    async fn test_store_detached_keys_have_no_owner() {
        let service = AttachmentService::new(storage(1024), Arc::new(MockTarget::new()));

        let stored = service
            .store_detached(
                vec![file("a.pdf", b"a"), file("b.pdf", b"b")],
                DocumentLabel::Other,
            )
            .await
            .unwrap();

        assert_eq!(stored.len(), 2);
        assert!(stored.iter().all(|a| !a.key.contains('/')));
        assert!(stored.iter().all(|a| a.label == DocumentLabel::Other));
    }

    #[tokio::test]
    async fn test_blank_filename_rejected() {
        let target = Arc::new(MockTarget::new());
        let owner = Uuid::new_v4();
        target.add_owner(owner);
        let service = AttachmentService::new(storage(1024), target);

        let result = service
            .attach(owner, file("  ", b"x"), DocumentLabel::Other)
            .await;
        assert!(matches!(result, Err(AttachmentError::Validation(_))));
    }
}
