//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Identity provider token configuration.
    pub auth: AuthConfig,
    /// Blob store configuration. Optional at startup: blob operations fail per call
    /// when it is missing or incomplete.
    #[serde(default)]
    pub storage: StorageSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum accepted request body in bytes (multipart uploads included).
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_body_bytes() -> usize {
    50 * 1024 * 1024
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Identity provider token configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared HS256 secret used by the identity provider to sign tokens.
    pub secret: String,
    /// Expected `iss` claim, if the provider sets one.
    #[serde(default)]
    pub issuer: Option<String>,
}

/// Blob store settings as read from the environment.
///
/// Every field is optional so that a partially configured store does not block
/// startup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageSettings {
    /// Backend kind: `s3` (default), `local` or `memory`.
    pub provider: Option<String>,
    /// AWS region.
    pub region: Option<String>,
    /// Bucket name.
    pub bucket: Option<String>,
    /// Access key ID.
    pub access_key_id: Option<String>,
    /// Secret access key.
    pub secret_access_key: Option<String>,
    /// Custom S3-compatible endpoint.
    pub endpoint: Option<String>,
    /// Root directory for the `local` backend.
    pub root: Option<String>,
    /// Maximum size of a single uploaded file in bytes.
    pub max_file_size: Option<u64>,
    /// Lifetime of issued signed URLs in seconds.
    pub signed_url_ttl_secs: Option<u64>,
    /// Accepted MIME types; empty accepts any.
    #[serde(default)]
    pub allowed_mime_types: Vec<String>,
}

impl StorageSettings {
    /// Backend kind, defaulting to `s3`.
    #[must_use]
    pub fn provider_kind(&self) -> &str {
        self.provider.as_deref().unwrap_or("s3")
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or a required value
    /// (database URL, auth secret) is missing.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("DOSSIER")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("storage.allowed_mime_types")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
