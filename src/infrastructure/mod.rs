//! Infrastructure layer
//!
//! Adapters for the domain ports and the ambient stack:
//! - config: figment-based configuration loading
//! - http: authorized reqwest client and bucket service client
//! - logging: tracing subscriber setup and secret scrubbing
//! - storage: durable slot backends

pub mod config;
pub mod http;
pub mod logging;
pub mod storage;
