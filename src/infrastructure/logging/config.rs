use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::models::LoggingConfig;

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console output format (json, pretty)
    #[serde(default = "default_format")]
    pub format: LogFormat,

    /// Directory for daily-rotated log files (if None logs only to the console)
    pub log_dir: Option<PathBuf>,

    /// Enable console logging on stderr
    #[serde(default = "default_true")]
    pub enable_console: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            log_dir: None,
            enable_console: true,
        }
    }
}

impl From<&LoggingConfig> for LogConfig {
    fn from(settings: &LoggingConfig) -> Self {
        let format = if settings.format.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        };
        Self {
            level: settings.level.clone(),
            format,
            log_dir: settings.log_dir.clone(),
            enable_console: true,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

const fn default_format() -> LogFormat {
    LogFormat::Pretty
}

const fn default_true() -> bool {
    true
}
