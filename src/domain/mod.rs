//! Domain layer for the bucket client
//!
//! Credential models, configuration models, and the ports the services
//! and infrastructure adapters meet at.

pub mod error;
pub mod models;
pub mod ports;

pub use error::{ApiError, CodecError, FetchError, StorageError, StoreError};
