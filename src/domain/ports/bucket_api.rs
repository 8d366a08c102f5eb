use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::ApiError;
use crate::domain::models::KeyPair;

/// File contents to upload, with the name the server records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Port trait for the bucket storage service
///
/// `issue_key` is unauthenticated; `upload` and `download` carry the
/// current credential as a Basic `Authorization` header.
#[async_trait]
pub trait BucketApi: Send + Sync {
    /// Create a bucket and return a freshly issued key pair for it
    async fn issue_key(&self) -> Result<KeyPair, ApiError>;

    /// Upload files into the bucket the credential belongs to
    ///
    /// Returns one file id per uploaded file, in order. Files whose
    /// checksum the server already knows return the existing id.
    async fn upload(&self, files: Vec<UploadFile>) -> Result<Vec<Uuid>, ApiError>;

    /// Download a file's bytes
    async fn download(&self, file_id: Uuid) -> Result<Vec<u8>, ApiError>;
}
