//! Time-limited signed URLs for stored blobs.

mod service;

pub use service::{AccessError, AccessMode, MAX_SIGNED_URL_TTL, SignedAccessService, SignedUrl};
