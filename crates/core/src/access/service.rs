//! Signed access service implementation.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dossier_shared::AppError;
use thiserror::Error;
use tracing::debug;

use crate::storage::{StorageError, StorageService};

/// How the client should handle a signed URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    /// Save to disk under the original name.
    Download,
    /// Render in the browser.
    View,
}

impl AccessMode {
    /// Convert to string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Download => "download",
            Self::View => "view",
        }
    }

    /// Content disposition requested from the blob store for a key.
    #[must_use]
    pub fn content_disposition(&self, key: &str) -> String {
        match self {
            Self::Download => {
                let filename: String = key
                    .rsplit('/')
                    .next()
                    .unwrap_or(key)
                    .chars()
                    .filter(|c| *c != '"' && !c.is_control())
                    .collect();
                format!("attachment; filename=\"{filename}\"")
            }
            Self::View => "inline".to_string(),
        }
    }
}

impl FromStr for AccessMode {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "download" => Ok(Self::Download),
            "view" => Ok(Self::View),
            other => Err(AccessError::InvalidMode(other.to_string())),
        }
    }
}

/// Longest lifetime a signed URL may be issued for (the S3 SigV4 limit).
pub const MAX_SIGNED_URL_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// A time-limited URL for one blob.
#[derive(Debug, Clone)]
pub struct SignedUrl {
    /// The signed URL.
    pub url: String,
    /// HTTP method the URL is signed for.
    pub method: String,
    /// Mode the URL was issued for.
    pub mode: AccessMode,
    /// When the URL stops working.
    pub expires_at: DateTime<Utc>,
}

/// Signed access errors.
#[derive(Debug, Error)]
pub enum AccessError {
    /// Unknown access mode.
    #[error("unknown access mode '{0}', expected 'download' or 'view'")]
    InvalidMode(String),

    /// Empty blob key.
    #[error("file key is required")]
    MissingKey,

    /// Lifetime outside `1..=MAX_SIGNED_URL_TTL` seconds.
    #[error("signed URL lifetime must be between 1 and {max} seconds", max = MAX_SIGNED_URL_TTL.as_secs())]
    InvalidTtl,

    /// Blob store failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<AccessError> for AppError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Storage(e) => e.into(),
            e => Self::Validation(e.to_string()),
        }
    }
}

/// Issues signed URLs and reads blob content.
///
/// Only ever handed a key. Callers decide whether the key belongs to a
/// record.
pub struct SignedAccessService {
    storage: Arc<StorageService>,
}

impl SignedAccessService {
    /// Create a new signed access service.
    #[must_use]
    pub fn new(storage: Arc<StorageService>) -> Self {
        Self { storage }
    }

    /// Default URL lifetime from configuration.
    #[must_use]
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.storage.config().signed_url_ttl_secs)
    }

    /// Issue a signed URL for a key.
    ///
    /// Signing is local, so an unknown key still yields a URL. The blob
    /// store answers 404 when the URL is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty, the lifetime is zero or longer
    /// than [`MAX_SIGNED_URL_TTL`], or the backend cannot sign.
    pub async fn issue(
        &self,
        key: &str,
        mode: AccessMode,
        ttl: Option<Duration>,
    ) -> Result<SignedUrl, AccessError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(AccessError::MissingKey);
        }

        let ttl = ttl.unwrap_or_else(|| self.default_ttl());
        if ttl.is_zero() || ttl > MAX_SIGNED_URL_TTL {
            return Err(AccessError::InvalidTtl);
        }

        let presigned = self
            .storage
            .presign_read(key, ttl, &mode.content_disposition(key))
            .await?;

        debug!(key, mode = mode.as_str(), expires_at = %presigned.expires_at, "Signed URL issued");
        Ok(SignedUrl {
            url: presigned.url,
            method: presigned.method,
            mode,
            expires_at: presigned.expires_at,
        })
    }

    /// Read a blob as text. Invalid UTF-8 is replaced rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the blob is absent.
    pub async fn read_text(&self, key: &str) -> Result<String, AccessError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(AccessError::MissingKey);
        }

        let bytes = self.storage.read(key).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
