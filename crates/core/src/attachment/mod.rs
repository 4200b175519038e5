//! Attachment service for record files.
//!
//! This module turns uploaded file payloads into attachment descriptors:
//! - Size and MIME checks
//! - Blob key generation and the blob write
//! - Appending descriptors to the owning Contact or Doc

mod error;
mod service;
mod types;

pub use error::AttachmentError;
pub use service::{AttachmentService, AttachmentTarget};
pub use types::{AttachOutcome, Attachment, DocumentLabel, FileUpload};
