//! Attachment types and data structures.

use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Document classification carried by every attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentLabel {
    /// Tax filings and supporting paperwork.
    Tax,
    /// Estate documents.
    Estate,
    /// Estate planning documents.
    EstatePlanning,
    /// Business documents.
    Business,
    /// Anything else.
    #[default]
    Other,
}

impl DocumentLabel {
    /// All labels, in display order.
    pub const ALL: [Self; 5] = [
        Self::Tax,
        Self::Estate,
        Self::EstatePlanning,
        Self::Business,
        Self::Other,
    ];

    /// Convert to the stored string value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tax => "tax",
            Self::Estate => "estate",
            Self::EstatePlanning => "estate planning",
            Self::Business => "business",
            Self::Other => "other",
        }
    }

    /// Parse a label, ignoring case and surrounding whitespace.
    ///
    /// Anything outside the fixed set is rejected rather than coerced.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|label| label.as_str() == normalized)
    }
}

impl std::fmt::Display for DocumentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DocumentLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DocumentLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "unknown document label '{raw}', expected one of: tax, estate, estate planning, business, other"
            ))
        })
    }
}

/// Attachment descriptor embedded in a Contact or Doc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Attachment {
    /// Original filename.
    pub name: String,
    /// Blob store key.
    #[serde(rename = "url")]
    pub key: String,
    /// Classification.
    #[serde(default)]
    pub label: DocumentLabel,
}

/// Raw file payload received from a caller.
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Original filename.
    pub filename: String,
    /// MIME type reported by the caller.
    pub content_type: String,
    /// File bytes.
    pub body: Bytes,
}

impl FileUpload {
    /// Fallback MIME type when the caller does not send one.
    pub const DEFAULT_CONTENT_TYPE: &'static str = "application/octet-stream";

    /// Create a file payload.
    #[must_use]
    pub fn new(
        filename: impl Into<String>,
        content_type: Option<&str>,
        body: impl Into<Bytes>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type
                .filter(|ct| !ct.is_empty())
                .unwrap_or(Self::DEFAULT_CONTENT_TYPE)
                .to_string(),
            body: body.into(),
        }
    }

    /// Payload size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        u64::try_from(self.body.len()).unwrap_or(u64::MAX)
    }
}

/// Result of attaching files to a record.
#[derive(Debug, Clone)]
pub struct AttachOutcome<R> {
    /// The owning record after the append.
    pub record: R,
    /// Descriptors appended by this call.
    pub attachments: Vec<Attachment>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_document_label_roundtrip() {
        for label in DocumentLabel::ALL {
            assert_eq!(DocumentLabel::parse(label.as_str()), Some(label));
        }
    }

    #[rstest]
    #[case("Estate Planning", Some(DocumentLabel::EstatePlanning))]
    #[case("  TAX ", Some(DocumentLabel::Tax))]
    #[case("estate_planning", None)]
    #[case("receipt", None)]
    #[case("", None)]
    fn test_document_label_parse(#[case] raw: &str, #[case] expected: Option<DocumentLabel>) {
        assert_eq!(DocumentLabel::parse(raw), expected);
    }

    #[test]
    fn test_attachment_wire_shape() {
        let attachment = Attachment {
            name: "will.pdf".to_string(),
            key: "abc/1-x-will.pdf".to_string(),
            label: DocumentLabel::EstatePlanning,
        };

        let json = serde_json::to_value(&attachment).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "will.pdf",
                "url": "abc/1-x-will.pdf",
                "label": "estate planning"
            })
        );

        let back: Attachment = serde_json::from_value(json).unwrap();
        assert_eq!(back, attachment);
    }

    #[test]
    fn test_attachment_rejects_unknown_label() {
        let json = serde_json::json!({"name": "a", "url": "k", "label": "receipts"});
        assert!(serde_json::from_value::<Attachment>(json).is_err());
    }

    #[test]
    fn test_file_upload_default_content_type() {
        let file = FileUpload::new("notes.txt", None, b"hi".to_vec());
        assert_eq!(file.content_type, FileUpload::DEFAULT_CONTENT_TYPE);
        assert_eq!(file.size(), 2);

        let file = FileUpload::new("notes.txt", Some("text/plain"), b"hi".to_vec());
        assert_eq!(file.content_type, "text/plain");
    }
}
