//! Contact records.
//!
//! A Contact is a person the practice holds files for. Email is unique
//! across contacts.

mod service;
mod types;

pub use service::{ContactRepository, ContactService};
pub use types::{Address, Contact, ContactFilter, ContactPatch, ContactQuery, NewContact};
