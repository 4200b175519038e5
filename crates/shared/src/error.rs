//! Application-wide error types.

use thiserror::Error;

/// Application error types.
///
/// Every endpoint maps its service failures onto one of these variants.
#[derive(Debug, Error)]
pub enum AppError {
    /// No verified caller identity.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Record or attachment absent.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing or invalid field, or a uniqueness violation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Blob store read/write failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Record store failure.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Storage(_) | Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "unauthorized",
            Self::NotFound(_) => "not_found",
            Self::Validation(_) => "validation_error",
            Self::Storage(_) => "storage_error",
            Self::Database(_) => "database_error",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Human-readable details safe to return to the caller.
    ///
    /// Record store and internal failures are not echoed back.
    #[must_use]
    pub fn details(&self) -> String {
        match self {
            Self::Unauthorized(msg)
            | Self::NotFound(msg)
            | Self::Validation(msg)
            | Self::Storage(msg) => msg.clone(),
            Self::Database(_) | Self::Internal(_) => "An error occurred".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::Unauthorized(String::new()), 401, "unauthorized")]
    #[case(AppError::NotFound(String::new()), 404, "not_found")]
    #[case(AppError::Validation(String::new()), 400, "validation_error")]
    #[case(AppError::Storage(String::new()), 500, "storage_error")]
    #[case(AppError::Database(String::new()), 500, "database_error")]
    #[case(AppError::Internal(String::new()), 500, "internal_error")]
    fn test_error_status_and_code(
        #[case] err: AppError,
        #[case] status: u16,
        #[case] code: &str,
    ) {
        assert_eq!(err.status_code(), status);
        assert_eq!(err.error_code(), code);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::NotFound("contact".into()).to_string(),
            "Not found: contact"
        );
        assert_eq!(
            AppError::Validation("email already in use".into()).to_string(),
            "Validation error: email already in use"
        );
        assert_eq!(
            AppError::Storage("bucket unreachable".into()).to_string(),
            "Storage error: bucket unreachable"
        );
    }

    #[test]
    fn test_details_hide_database_errors() {
        let err = AppError::Database("connection refused at 10.0.0.4".into());
        assert_eq!(err.details(), "An error occurred");

        let err = AppError::Validation("firstName is required".into());
        assert_eq!(err.details(), "firstName is required");
    }
}
