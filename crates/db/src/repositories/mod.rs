//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod contact;
pub mod doc;

pub use contact::ContactRepository;
pub use doc::DocRepository;

use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use serde::de::DeserializeOwned;

use dossier_core::record::RecordError;

/// Map a database error.
pub(crate) fn map_db_err(err: DbErr) -> RecordError {
    RecordError::repository(err.to_string())
}

/// Map a database error from a write guarded by a unique index. A violation
/// becomes a validation error carrying `conflict`.
pub(crate) fn map_unique_err(conflict: &'static str) -> impl Fn(DbErr) -> RecordError {
    move |err| match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => RecordError::validation(conflict),
        _ => map_db_err(err),
    }
}

/// Encode a value for a JSONB column.
pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, RecordError> {
    serde_json::to_value(value).map_err(|e| RecordError::repository(e.to_string()))
}

/// Decode a JSONB column.
pub(crate) fn from_json<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, RecordError> {
    serde_json::from_value(value).map_err(|e| RecordError::repository(e.to_string()))
}
