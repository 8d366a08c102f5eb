use std::path::PathBuf;

use reqwest::header::InvalidHeaderValue;
use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised by a durable slot backend
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to access slot storage at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Slot storage at {path} is not a valid JSON object: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Slot storage rejected write to '{0}'")]
    WriteRejected(String),
}

/// Errors raised while converting a credential to or from its slot encoding
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Persisted credential is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Failed to encode credential: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Key id '{0}' contains ':', which the Basic credential uses as its delimiter")]
    InvalidKeyId(String),
}

/// Errors returned by a credential store write
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Errors raised by an authorized fetch
///
/// Transport failures are passed through untouched; the wrapper itself only
/// adds the two header-construction failures.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("No credential is stored and authorized requests require one")]
    MissingCredential,

    #[error("Stored credential cannot be sent in an Authorization header: {0}")]
    InvalidAuthorization(#[from] InvalidHeaderValue),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Errors returned by the typed bucket endpoints
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request could not be built or sent
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Server refused the request (HTTP 400), typically bad credentials
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// HTTP 401 or 403
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    /// The bucket holds no file with this id (HTTP 204 on download)
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// HTTP 5xx
    #[error("Server error ({0}): {1}")]
    Server(StatusCode, String),

    /// Any other non-success status
    #[error("Unexpected response ({0}): {1}")]
    Unexpected(StatusCode, String),

    /// Response body did not have the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    /// Map a non-success status and the server's message to an error
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::BAD_REQUEST => Self::Rejected(message),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Unauthorized(message),
            status if status.is_server_error() => Self::Server(status, message),
            status => Self::Unexpected(status, message),
        }
    }
}
