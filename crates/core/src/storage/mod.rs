//! Blob storage for uploaded files using Apache OpenDAL.
//!
//! Supported backends:
//! - AWS S3 and S3-compatible endpoints
//! - Local filesystem (development only)
//! - In-process memory (tests)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Apache OpenDAL                              │
//! │                   (Unified Storage API)                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ op.write_with("key", data) │ op.presign_read_with("key", ttl)   │
//! │ op.read("key")             │ op.stat("key")                     │
//! │ op.delete("key")           │ op.list("prefix/")                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod service;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::{PresignedUrl, StorageService};
