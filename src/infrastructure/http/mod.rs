//! HTTP infrastructure
//!
//! - AuthorizedClient: reqwest wrapper injecting the Basic credential
//! - RequestOptions: pass-through request options
//! - BucketClient: typed bucket storage endpoints

pub mod authorized_client;
pub mod bucket_client;
pub mod request_options;

pub use authorized_client::AuthorizedClient;
pub use bucket_client::BucketClient;
pub use request_options::{RequestBody, RequestOptions};
