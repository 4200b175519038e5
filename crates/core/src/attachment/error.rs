//! Attachment error types.

use dossier_shared::AppError;
use thiserror::Error;

use crate::record::RecordError;
use crate::storage::StorageError;

/// Attachment operation errors.
#[derive(Debug, Error)]
pub enum AttachmentError {
    /// Owning record not found.
    #[error("{kind} not found: {id}")]
    OwnerNotFound {
        /// Owner kind (`Contact` or `Doc`).
        kind: &'static str,
        /// Requested owner id.
        id: String,
    },

    /// Invalid payload or label.
    #[error("{0}")]
    Validation(String),

    /// Blob store operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Record store operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl AttachmentError {
    /// Create an owner not found error.
    #[must_use]
    pub fn owner_not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::OwnerNotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Create a validation error.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}

impl From<RecordError> for AttachmentError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::Validation(msg) => Self::Validation(msg),
            RecordError::NotFound { kind, id } => Self::OwnerNotFound { kind, id },
            RecordError::Repository(msg) => Self::Repository(msg),
        }
    }
}

impl From<AttachmentError> for AppError {
    fn from(err: AttachmentError) -> Self {
        match err {
            e @ AttachmentError::OwnerNotFound { .. } => Self::NotFound(e.to_string()),
            AttachmentError::Validation(msg) => Self::Validation(msg),
            AttachmentError::Storage(e) => e.into(),
            AttachmentError::Repository(msg) => Self::Database(msg),
        }
    }
}
