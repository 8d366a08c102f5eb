//! Bucket client - credentials and authorized requests for bucket storage
//!
//! A persisted credential store and an HTTP client that signs every request
//! with the credential current at call time.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): credential and configuration models, ports
//! - **Service Layer** (`services`): the credential store and its slot codecs
//! - **Infrastructure Layer** (`infrastructure`): storage, HTTP, config, logging
//! - **CLI Layer** (`cli`): the `bucket` command-line interface
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use bucket_client::{AuthorizedClient, CredentialStore, KeyPair, KeyPairCodec, MemorySlotStorage, RequestOptions};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let store = CredentialStore::load(Arc::new(MemorySlotStorage::new()), "auth-key", KeyPairCodec::new());
//! store.set(Some(KeyPair::new("key-id", "secret")))?;
//!
//! let client = AuthorizedClient::new(reqwest::Client::new(), Arc::new(store.clone()));
//! let response = client.fetch("http://127.0.0.1:3001/download/42", RequestOptions::new()).await?;
//! println!("{}", response.status());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::error::{ApiError, CodecError, FetchError, StorageError, StoreError};
pub use domain::models::{BasicCredential, Config, KeyPair, SlotFormat};
pub use domain::ports::{BucketApi, CredentialSource, SlotStorage, StaticCredential, UploadFile};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::http::{AuthorizedClient, BucketClient, RequestBody, RequestOptions};
pub use infrastructure::storage::{FileSlotStorage, MemorySlotStorage};
pub use services::{CredentialStore, KeyPairCodec, RawTokenCodec, SlotCodec, Subscription};
