//! Core business logic for Dossier.
//!
//! This crate contains pure domain logic with ZERO web or database dependencies.
//! Persistence is reached through repository traits implemented by the db crate.
//!
//! # Modules
//!
//! - `record` - Shared record errors and field validation
//! - `contact` - Contact records and their service
//! - `doc` - Doc records and their service
//! - `attachment` - File payload to blob key to attachment descriptor
//! - `storage` - Blob store access through OpenDAL
//! - `access` - Time-limited signed URLs for stored blobs

pub mod access;
pub mod attachment;
pub mod contact;
pub mod doc;
pub mod record;
pub mod storage;
