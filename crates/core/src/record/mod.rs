//! Behavior shared by the Contact and Doc record services.

mod error;
mod validation;

pub use error::RecordError;
pub use validation::{normalize_optional, parse_label_list, require_non_empty, validate_email};
