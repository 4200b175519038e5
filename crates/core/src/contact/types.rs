//! Contact types and data structures.

use chrono::{DateTime, Utc};
use dossier_shared::ContactId;
use serde::{Deserialize, Serialize};

use crate::attachment::Attachment;
use crate::record::{RecordError, normalize_optional, require_non_empty, validate_email};

/// Postal address. Every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Address {
    /// Street line.
    #[serde(default)]
    pub street: Option<String>,
    /// City.
    #[serde(default)]
    pub city: Option<String>,
    /// State or region.
    #[serde(default)]
    pub state: Option<String>,
    /// Postal code.
    #[serde(default)]
    pub zip: Option<String>,
}

impl Address {
    /// Trim every part and drop blank ones.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            street: normalize_optional(self.street),
            city: normalize_optional(self.city),
            state: normalize_optional(self.state),
            zip: normalize_optional(self.zip),
        }
    }
}

/// A person the practice holds files for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Contact ID.
    pub id: ContactId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Unique email address.
    pub email: String,
    /// Postal address.
    pub address: Address,
    /// Primary phone.
    pub phone_number: Option<String>,
    /// Secondary phone.
    pub alt_phone: Option<String>,
    /// Free-text tags.
    pub labels: Vec<String>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Attached files, oldest first.
    pub documents: Vec<Attachment>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a contact.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewContact {
    /// Given name (required).
    #[serde(default)]
    pub first_name: String,
    /// Family name (required).
    #[serde(default)]
    pub last_name: String,
    /// Email (required, unique).
    #[serde(default)]
    pub email: String,
    /// Postal address.
    #[serde(default)]
    pub address: Address,
    /// Primary phone.
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Secondary phone.
    #[serde(default)]
    pub alt_phone: Option<String>,
    /// Free-text tags.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Attachments stored before the contact was created.
    #[serde(default)]
    pub documents: Vec<Attachment>,
}

impl NewContact {
    /// Check required fields and normalize the rest.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first missing or malformed field.
    pub fn validated(self) -> Result<Self, RecordError> {
        Ok(Self {
            first_name: require_non_empty("firstName", &self.first_name)?,
            last_name: require_non_empty("lastName", &self.last_name)?,
            email: validate_email(&self.email)?,
            address: self.address.normalized(),
            phone_number: normalize_optional(self.phone_number),
            alt_phone: normalize_optional(self.alt_phone),
            labels: self.labels,
            notes: normalize_optional(self.notes),
            documents: self.documents,
        })
    }
}

/// Partial update for a contact.
///
/// Absent fields are left alone. A blank optional string clears the field.
/// `labels`, `address` and `documents` replace the stored value whole.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContactPatch {
    /// New given name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// New family name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// New email.
    #[serde(default)]
    pub email: Option<String>,
    /// New address.
    #[serde(default)]
    pub address: Option<Address>,
    /// New primary phone.
    #[serde(default)]
    pub phone_number: Option<String>,
    /// New secondary phone.
    #[serde(default)]
    pub alt_phone: Option<String>,
    /// New tag list.
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    /// New notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// New attachment list.
    #[serde(default)]
    pub documents: Option<Vec<Attachment>>,
}

impl ContactPatch {
    /// Returns true when no field is supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.address.is_none()
            && self.phone_number.is_none()
            && self.alt_phone.is_none()
            && self.labels.is_none()
            && self.notes.is_none()
            && self.documents.is_none()
    }

    /// Check supplied required fields and normalize the rest.
    ///
    /// Optional strings come out trimmed. An empty string is kept so the
    /// store knows to clear that field.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a required field is blanked or the
    /// email is malformed.
    pub fn validated(self) -> Result<Self, RecordError> {
        let clearable = |v: Option<String>| v.map(|s| s.trim().to_string());
        Ok(Self {
            first_name: self
                .first_name
                .map(|v| require_non_empty("firstName", &v))
                .transpose()?,
            last_name: self
                .last_name
                .map(|v| require_non_empty("lastName", &v))
                .transpose()?,
            email: self.email.map(|v| validate_email(&v)).transpose()?,
            address: self.address.map(Address::normalized),
            phone_number: clearable(self.phone_number),
            alt_phone: clearable(self.alt_phone),
            labels: self.labels,
            notes: clearable(self.notes),
            documents: self.documents,
        })
    }

    /// Apply the supplied fields to a contact in place.
    pub fn apply_to(&self, contact: &mut Contact) {
        if let Some(v) = &self.first_name {
            contact.first_name.clone_from(v);
        }
        if let Some(v) = &self.last_name {
            contact.last_name.clone_from(v);
        }
        if let Some(v) = &self.email {
            contact.email.clone_from(v);
        }
        if let Some(v) = &self.address {
            contact.address = v.clone();
        }
        if let Some(v) = &self.phone_number {
            contact.phone_number = normalize_optional(Some(v.clone()));
        }
        if let Some(v) = &self.alt_phone {
            contact.alt_phone = normalize_optional(Some(v.clone()));
        }
        if let Some(v) = &self.labels {
            contact.labels.clone_from(v);
        }
        if let Some(v) = &self.notes {
            contact.notes = normalize_optional(Some(v.clone()));
        }
        if let Some(v) = &self.documents {
            contact.documents.clone_from(v);
        }
    }
}

/// Raw list query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactQuery {
    /// Given name to match.
    pub first_name: Option<String>,
    /// Family name to match.
    pub last_name: Option<String>,
    /// Email to match.
    pub email: Option<String>,
}

/// Resolved contact list filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactFilter {
    /// Every contact.
    All,
    /// Exact match on both names.
    Name {
        /// Given name.
        first_name: String,
        /// Family name.
        last_name: String,
    },
    /// Exact match on email.
    Email(String),
}

impl ContactFilter {
    /// Resolve query parameters into a single filter.
    ///
    /// A complete name pair wins over email. A lone first or last name is
    /// ignored. With neither, every contact matches.
    #[must_use]
    pub fn from_query(query: ContactQuery) -> Self {
        let first = normalize_optional(query.first_name);
        let last = normalize_optional(query.last_name);
        if let (Some(first_name), Some(last_name)) = (first, last) {
            return Self::Name {
                first_name,
                last_name,
            };
        }
        match normalize_optional(query.email) {
            Some(email) => Self::Email(email),
            None => Self::All,
        }
    }

    /// Check whether a contact passes this filter.
    #[must_use]
    pub fn matches(&self, contact: &Contact) -> bool {
        match self {
            Self::All => true,
            Self::Name {
                first_name,
                last_name,
            } => contact.first_name == *first_name && contact.last_name == *last_name,
            Self::Email(email) => contact.email == *email,
        }
    }
}
