use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main configuration structure for the bucket client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Bucket server location
    #[serde(default)]
    pub server: ServerConfig,

    /// Credential persistence
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// Outbound request behavior
    #[serde(default)]
    pub http: HttpConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Bucket server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    /// Base URL requests with a relative target are resolved against
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://127.0.0.1:3001".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Encoding of the credential held in the durable slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotFormat {
    /// Opaque token stored verbatim
    Raw,
    /// `{"keyId": ..., "key": ...}` record
    #[default]
    Json,
}

/// Credential store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CredentialsConfig {
    /// File backing the durable slots
    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,

    /// Name of the slot holding the credential
    #[serde(default = "default_slot")]
    pub slot: String,

    /// Slot encoding
    #[serde(default)]
    pub format: SlotFormat,

    /// Convert legacy raw tokens found in a JSON slot instead of discarding them
    #[serde(default = "default_true")]
    pub migrate_legacy: bool,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from(".bucket/storage.json")
}

fn default_slot() -> String {
    "auth-key".to_string()
}

const fn default_true() -> bool {
    true
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            slot: default_slot(),
            format: SlotFormat::default(),
            migrate_legacy: default_true(),
        }
    }
}

/// HTTP configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Refuse to send authorized requests while no credential is stored
    #[serde(default)]
    pub require_credential: bool,
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            require_credential: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rotated JSON log files
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
        }
    }
}
