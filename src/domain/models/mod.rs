//! Domain models

pub mod config;
pub mod credential;

pub use config::{Config, CredentialsConfig, HttpConfig, LoggingConfig, ServerConfig, SlotFormat};
pub use credential::{mask_secret, BasicCredential, KeyPair};
