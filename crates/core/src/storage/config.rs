//! Storage configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use dossier_shared::StorageSettings;

/// Storage provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageProvider {
    /// AWS S3 or an S3-compatible service.
    S3 {
        /// Custom endpoint URL. `None` uses the AWS endpoint for the region.
        endpoint: Option<String>,
        /// S3 bucket name.
        bucket: String,
        /// AWS access key ID.
        access_key_id: String,
        /// AWS secret access key.
        secret_access_key: String,
        /// AWS region.
        region: String,
    },
    /// Local filesystem (development only)
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
    /// In-process memory (tests and throwaway environments)
    Memory,
}

impl StorageProvider {
    /// Create an S3 provider.
    #[must_use]
    pub fn s3(
        bucket: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self::S3 {
            endpoint: None,
            bucket: bucket.into(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: region.into(),
        }
    }

    /// Create local filesystem provider (development only).
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Create in-memory provider.
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory
    }

    /// Builds a provider from environment settings.
    ///
    /// Returns `None` when the settings are missing a value the backend needs.
    #[must_use]
    pub fn from_settings(settings: &StorageSettings) -> Option<Self> {
        match settings.provider_kind() {
            "memory" => Some(Self::Memory),
            "local" => settings.root.as_ref().map(Self::local_fs),
            "s3" => Some(Self::S3 {
                endpoint: settings.endpoint.clone(),
                bucket: settings.bucket.clone()?,
                access_key_id: settings.access_key_id.clone()?,
                secret_access_key: settings.secret_access_key.clone()?,
                region: settings.region.clone()?,
            }),
            _ => None,
        }
    }

    /// Get the provider name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "s3",
            Self::LocalFs { .. } => "local",
            Self::Memory => "memory",
        }
    }

    /// Get the bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        match self {
            Self::S3 { bucket, .. } => bucket,
            Self::LocalFs { root } => root.to_str().unwrap_or("local"),
            Self::Memory => "memory",
        }
    }
}

/// Storage service configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
    /// Maximum file size in bytes.
    pub max_file_size: u64,
    /// Signed URL TTL in seconds (default: 3600 = 1 hour).
    pub signed_url_ttl_secs: u64,
    /// Allowed MIME types for upload. Empty accepts any type.
    pub allowed_mime_types: Vec<String>,
}

impl StorageConfig {
    /// Default max file size: 10MB.
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
    /// Default signed URL TTL: 1 hour.
    pub const DEFAULT_SIGNED_URL_TTL: u64 = 3600;

    /// Create a new storage config with default settings.
    #[must_use]
    pub fn new(provider: StorageProvider) -> Self {
        Self {
            provider,
            max_file_size: Self::DEFAULT_MAX_FILE_SIZE,
            signed_url_ttl_secs: Self::DEFAULT_SIGNED_URL_TTL,
            allowed_mime_types: Vec::new(),
        }
    }

    /// Builds a config from environment settings, or `None` if the provider
    /// cannot be resolved.
    #[must_use]
    pub fn from_settings(settings: &StorageSettings) -> Option<Self> {
        let provider = StorageProvider::from_settings(settings)?;
        Some(Self {
            provider,
            max_file_size: settings
                .max_file_size
                .unwrap_or(Self::DEFAULT_MAX_FILE_SIZE),
            signed_url_ttl_secs: settings
                .signed_url_ttl_secs
                .unwrap_or(Self::DEFAULT_SIGNED_URL_TTL),
            allowed_mime_types: settings.allowed_mime_types.clone(),
        })
    }

    /// Set maximum file size.
    #[must_use]
    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Set signed URL TTL.
    #[must_use]
    pub fn with_signed_url_ttl(mut self, secs: u64) -> Self {
        self.signed_url_ttl_secs = secs;
        self
    }

    /// Set allowed MIME types.
    #[must_use]
    pub fn with_allowed_mime_types(mut self, types: Vec<String>) -> Self {
        self.allowed_mime_types = types;
        self
    }

    /// Check if a MIME type is allowed.
    #[must_use]
    pub fn is_mime_type_allowed(&self, mime_type: &str) -> bool {
        self.allowed_mime_types.is_empty() || self.allowed_mime_types.iter().any(|t| t == mime_type)
    }
}
