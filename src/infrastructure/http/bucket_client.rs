//! Client for the bucket storage service endpoints.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, Response, StatusCode};
use serde::Deserialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::authorized_client::AuthorizedClient;
use super::request_options::RequestOptions;
use crate::domain::error::{ApiError, FetchError};
use crate::domain::models::KeyPair;
use crate::domain::ports::{BucketApi, UploadFile};
use crate::infrastructure::logging::SecretScrubber;

/// Form field every uploaded file is sent under
const UPLOAD_FIELD: &str = "files";

/// Error body returned by the bucket server
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    error_info: String,
}

/// HTTP implementation of [`BucketApi`]
#[derive(Debug, Clone)]
pub struct BucketClient {
    base_url: String,
    client: AuthorizedClient,
    scrubber: SecretScrubber,
}

impl BucketClient {
    pub fn new(base_url: impl Into<String>, client: AuthorizedClient) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            scrubber: SecretScrubber::new(),
        }
    }

    /// Absolute URL for a server path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub const fn authorized(&self) -> &AuthorizedClient {
        &self.client
    }

    /// Pass successful responses through; turn the rest into [`ApiError`]
    async fn check(&self, response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error body".to_string());
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map_or(body, |error| error.error_info);

        warn!(
            status = %status,
            message = %self.scrubber.scrub_message(&message),
            "bucket server returned an error"
        );
        Err(ApiError::from_status(status, message))
    }
}

#[async_trait]
impl BucketApi for BucketClient {
    #[instrument(skip(self))]
    async fn issue_key(&self) -> Result<KeyPair, ApiError> {
        let response = self
            .client
            .http()
            .get(self.url("/key"))
            .send()
            .await
            .map_err(FetchError::from)?;
        let pair: KeyPair = self.check(response).await?.json().await.map_err(ApiError::Decode)?;
        info!(key_id = %pair.key_id, "issued bucket key");
        Ok(pair)
    }

    #[instrument(skip_all, fields(files = files.len()))]
    async fn upload(&self, files: Vec<UploadFile>) -> Result<Vec<Uuid>, ApiError> {
        let form = files.into_iter().fold(Form::new(), |form, file| {
            form.part(UPLOAD_FIELD, Part::bytes(file.bytes).file_name(file.name))
        });

        let options = RequestOptions::new().method(Method::POST).multipart(form);
        let response = self.client.fetch(self.url("/upload"), options).await?;
        let ids: Vec<Uuid> = self.check(response).await?.json().await.map_err(ApiError::Decode)?;
        info!(uploaded = ids.len(), "upload complete");
        Ok(ids)
    }

    #[instrument(skip(self))]
    async fn download(&self, file_id: Uuid) -> Result<Vec<u8>, ApiError> {
        let response = self
            .client
            .fetch(self.url(&format!("/download/{file_id}")), RequestOptions::new())
            .await?;

        // The server answers an unknown id with 204 and an error body.
        if response.status() == StatusCode::NO_CONTENT {
            return Err(ApiError::FileNotFound(file_id.to_string()));
        }

        let bytes = self.check(response).await?.bytes().await.map_err(ApiError::Decode)?;
        Ok(bytes.to_vec())
    }
}
