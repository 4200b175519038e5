//! Record service error types.

use dossier_shared::AppError;
use thiserror::Error;

/// Record operation errors.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Missing or invalid field, or uniqueness violation.
    #[error("{0}")]
    Validation(String),

    /// Record not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Record kind (`Contact` or `Doc`).
        kind: &'static str,
        /// Requested id.
        id: String,
    },

    /// Record store failure.
    #[error("repository error: {0}")]
    Repository(String),
}

impl RecordError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a missing required field error.
    #[must_use]
    pub fn missing_field(field: &str) -> Self {
        Self::Validation(format!("{field} is required"))
    }

    /// Create a duplicate email error.
    #[must_use]
    pub fn duplicate_email(email: &str) -> Self {
        Self::Validation(format!("email '{email}' is already in use"))
    }

    /// Create a contact not found error.
    #[must_use]
    pub fn contact_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            kind: "Contact",
            id: id.to_string(),
        }
    }

    /// Create a doc not found error.
    #[must_use]
    pub fn doc_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            kind: "Doc",
            id: id.to_string(),
        }
    }

    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}

impl From<RecordError> for AppError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::Validation(msg) => Self::Validation(msg),
            e @ RecordError::NotFound { .. } => Self::NotFound(e.to_string()),
            RecordError::Repository(msg) => Self::Database(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_error_to_app_error() {
        let err: AppError = RecordError::missing_field("firstName").into();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.details(), "firstName is required");

        let err: AppError = RecordError::contact_not_found("abc").into();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.details(), "Contact not found: abc");

        let err: AppError = RecordError::repository("pool timed out").into();
        assert_eq!(err.status_code(), 500);
    }
}
