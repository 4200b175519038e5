//! Doc types and data structures.

use chrono::{DateTime, Utc};
use dossier_shared::{ContactId, DocId};
use serde::{Deserialize, Serialize};

use crate::attachment::Attachment;
use crate::record::{RecordError, normalize_optional, require_non_empty};

/// A titled document record tied to a contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doc {
    /// Doc ID.
    pub id: DocId,
    /// Title.
    pub doc_title: String,
    /// Portal username.
    pub pb_username: Option<String>,
    /// Portal email.
    pub pb_email: Option<String>,
    /// Free-text tags.
    pub labels: Vec<String>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Attached files, oldest first.
    pub documents: Vec<Attachment>,
    /// Owning contact. Not checked for existence.
    pub contact: ContactId,
    /// Creation time.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a doc.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewDoc {
    /// Title (required).
    #[serde(default)]
    pub doc_title: String,
    /// Portal username.
    #[serde(default)]
    pub pb_username: Option<String>,
    /// Portal email.
    #[serde(default)]
    pub pb_email: Option<String>,
    /// Free-text tags.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Owning contact (required).
    #[serde(default)]
    pub contact: Option<ContactId>,
    /// Attachments stored before the doc was created.
    #[serde(default)]
    pub documents: Vec<Attachment>,
}

/// Doc input after validation.
#[derive(Debug, Clone)]
pub struct ValidDoc {
    /// Title.
    pub doc_title: String,
    /// Portal username.
    pub pb_username: Option<String>,
    /// Portal email.
    pub pb_email: Option<String>,
    /// Free-text tags.
    pub labels: Vec<String>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Owning contact.
    pub contact: ContactId,
    /// Initial attachments.
    pub documents: Vec<Attachment>,
}

impl NewDoc {
    /// Check required fields and normalize the rest.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the title or contact is missing.
    pub fn validated(self) -> Result<ValidDoc, RecordError> {
        let doc_title = require_non_empty("doc_title", &self.doc_title)?;
        let contact = self
            .contact
            .ok_or_else(|| RecordError::missing_field("contact"))?;
        Ok(ValidDoc {
            doc_title,
            pb_username: normalize_optional(self.pb_username),
            pb_email: normalize_optional(self.pb_email),
            labels: self.labels,
            notes: normalize_optional(self.notes),
            contact,
            documents: self.documents,
        })
    }
}

/// Partial update for a doc.
///
/// Absent fields are left alone. A blank optional string clears the field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocPatch {
    /// New title.
    #[serde(default)]
    pub doc_title: Option<String>,
    /// New portal username.
    #[serde(default)]
    pub pb_username: Option<String>,
    /// New portal email.
    #[serde(default)]
    pub pb_email: Option<String>,
    /// New tag list.
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    /// New notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// New owning contact.
    #[serde(default)]
    pub contact: Option<ContactId>,
    /// New attachment list.
    #[serde(default)]
    pub documents: Option<Vec<Attachment>>,
}

impl DocPatch {
    /// Returns true when no field is supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.doc_title.is_none()
            && self.pb_username.is_none()
            && self.pb_email.is_none()
            && self.labels.is_none()
            && self.notes.is_none()
            && self.contact.is_none()
            && self.documents.is_none()
    }

    /// Check a supplied title and trim optional strings.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the title is blanked.
    pub fn validated(self) -> Result<Self, RecordError> {
        let clearable = |v: Option<String>| v.map(|s| s.trim().to_string());
        Ok(Self {
            doc_title: self
                .doc_title
                .map(|v| require_non_empty("doc_title", &v))
                .transpose()?,
            pb_username: clearable(self.pb_username),
            pb_email: clearable(self.pb_email),
            labels: self.labels,
            notes: clearable(self.notes),
            contact: self.contact,
            documents: self.documents,
        })
    }

    /// Apply the supplied fields to a doc in place.
    pub fn apply_to(&self, doc: &mut Doc) {
        if let Some(v) = &self.doc_title {
            doc.doc_title.clone_from(v);
        }
        if let Some(v) = &self.pb_username {
            doc.pb_username = normalize_optional(Some(v.clone()));
        }
        if let Some(v) = &self.pb_email {
            doc.pb_email = normalize_optional(Some(v.clone()));
        }
        if let Some(v) = &self.labels {
            doc.labels.clone_from(v);
        }
        if let Some(v) = &self.notes {
            doc.notes = normalize_optional(Some(v.clone()));
        }
        if let Some(v) = self.contact {
            doc.contact = v;
        }
        if let Some(v) = &self.documents {
            doc.documents.clone_from(v);
        }
    }
}
