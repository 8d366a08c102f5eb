//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - Console output on stderr (pretty or JSON)
//! - Daily-rotated JSON log files
//! - Secret scrubbing for messages that echo server or user input

pub mod config;
pub mod logger;
pub mod secret_scrubbing;

pub use config::{LogConfig, LogFormat};
pub use logger::LoggerImpl;
pub use secret_scrubbing::SecretScrubber;
