//! Field validation and normalization.

use validator::ValidateEmail;

use super::RecordError;

/// Returns the trimmed value, or a validation error naming the field when blank.
pub fn require_non_empty(field: &str, value: &str) -> Result<String, RecordError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RecordError::missing_field(field));
    }
    Ok(trimmed.to_string())
}

/// Trims an optional text field; blank becomes `None`.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Requires a syntactically valid email address.
pub fn validate_email(value: &str) -> Result<String, RecordError> {
    let email = require_non_empty("email", value)?;
    if !email.validate_email() {
        return Err(RecordError::validation(format!(
            "email '{email}' is not a valid address"
        )));
    }
    Ok(email)
}

/// Parses a labels form field, which must be a JSON array of strings.
pub fn parse_label_list(raw: &str) -> Result<Vec<String>, RecordError> {
    serde_json::from_str::<Vec<String>>(raw)
        .map_err(|_| RecordError::validation("labels must be a JSON array of strings"))
}
