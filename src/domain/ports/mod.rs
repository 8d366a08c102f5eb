//! Port trait definitions (Hexagonal Architecture)
//!
//! - SlotStorage: durable key-value slots backing the credential store
//! - CredentialSource: snapshot access to the current credential
//! - BucketApi: bucket storage service operations

pub mod bucket_api;
pub mod credential_source;
pub mod slot_storage;

pub use bucket_api::{BucketApi, UploadFile};
pub use credential_source::{CredentialSource, StaticCredential};
pub use slot_storage::SlotStorage;
