//! Multipart form parsing.

use std::collections::HashMap;

use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use dossier_core::attachment::{DocumentLabel, FileUpload};
use dossier_core::record::parse_label_list;

use crate::ApiError;

/// Field names a form accepts.
#[derive(Debug, Clone, Copy)]
pub struct FormFields {
    /// Text fields.
    pub text: &'static [&'static str],
    /// File fields.
    pub files: &'static [&'static str],
}

/// Parsed multipart form.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, Vec<FileUpload>>,
}

impl FormData {
    /// Read every part, rejecting names the form does not accept.
    ///
    /// Empty file parts (no filename and no bytes) are skipped, which is what
    /// browsers send for an untouched file input.
    ///
    /// # Errors
    ///
    /// Returns 400 for an unknown field or a malformed body, 413 when the
    /// body exceeds the configured limit.
    pub async fn read(mut multipart: Multipart, accepted: FormFields) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();

            if accepted.files.contains(&name.as_str()) {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let body = field.bytes().await.map_err(multipart_error)?;
                if filename.is_empty() && body.is_empty() {
                    continue;
                }
                form.files.entry(name).or_default().push(FileUpload::new(
                    filename,
                    content_type.as_deref(),
                    body,
                ));
            } else if accepted.text.contains(&name.as_str()) {
                let value = field.text().await.map_err(multipart_error)?;
                form.fields.insert(name, value);
            } else {
                return Err(ApiError::bad_request(format!("unknown field '{name}'")));
            }
        }

        Ok(form)
    }

    /// Take a text field.
    pub fn text(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }

    /// Take a text field, treating a blank value as absent.
    pub fn non_blank(&mut self, name: &str) -> Option<String> {
        self.text(name).filter(|v| !v.trim().is_empty())
    }

    /// Take a JSON-array labels field.
    ///
    /// # Errors
    ///
    /// Returns 400 if the value is not a JSON array of strings.
    pub fn labels(&mut self, name: &str) -> Result<Option<Vec<String>>, ApiError> {
        self.text(name)
            .map(|raw| parse_label_list(&raw))
            .transpose()
            .map_err(ApiError::from)
    }

    /// Take a document label field.
    ///
    /// # Errors
    ///
    /// Returns 400 for a value outside the fixed label set.
    pub fn document_label(&mut self, name: &str) -> Result<Option<DocumentLabel>, ApiError> {
        self.non_blank(name)
            .map(|raw| {
                DocumentLabel::parse(&raw)
                    .ok_or_else(|| ApiError::bad_request(format!("unknown document label '{raw}'")))
            })
            .transpose()
    }

    /// Take a JSON object field.
    ///
    /// # Errors
    ///
    /// Returns 400 if the value does not decode.
    pub fn json<T: serde::de::DeserializeOwned>(&mut self, name: &str) -> Result<Option<T>, ApiError> {
        self.non_blank(name)
            .map(|raw| {
                serde_json::from_str(&raw)
                    .map_err(|e| ApiError::bad_request(format!("{name} is malformed: {e}")))
            })
            .transpose()
    }

    /// Take every file sent under a field name, in arrival order.
    pub fn files(&mut self, name: &str) -> Vec<FileUpload> {
        self.files.remove(name).unwrap_or_default()
    }
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::payload_too_large(err.body_text())
    } else {
        ApiError::bad_request(err.body_text())
    }
}
