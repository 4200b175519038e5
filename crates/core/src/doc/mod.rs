//! Doc records.
//!
//! A Doc is a titled record referencing one Contact. The reference is not
//! checked, and deleting the Contact leaves its Docs in place.

mod service;
mod types;

pub use service::{DocRepository, DocService};
pub use types::{Doc, DocPatch, NewDoc, ValidDoc};
