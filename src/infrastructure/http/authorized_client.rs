use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, IntoUrl, Method, Request, Response};
use tracing::{debug, instrument};

use super::request_options::{RequestBody, RequestOptions};
use crate::domain::error::FetchError;
use crate::domain::models::HttpConfig;
use crate::domain::ports::CredentialSource;

/// HTTP client that signs every request with the current credential
///
/// Each call takes one snapshot of the credential source and sends it as
/// `Authorization: Basic <token>`. Responses and transport errors come back
/// exactly as reqwest produced them: there is no retry, no timeout of its
/// own, and no status translation.
#[derive(Clone)]
pub struct AuthorizedClient {
    http: Client,
    credentials: Arc<dyn CredentialSource>,
    require_credential: bool,
}

impl AuthorizedClient {
    pub fn new(http: Client, credentials: Arc<dyn CredentialSource>) -> Self {
        Self {
            http,
            credentials,
            require_credential: false,
        }
    }

    /// Build the underlying reqwest client from configuration
    pub fn with_config(
        config: &HttpConfig,
        credentials: Arc<dyn CredentialSource>,
    ) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("bucket-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::new(http, credentials).require_credential(config.require_credential))
    }

    /// Fail with [`FetchError::MissingCredential`] instead of sending an
    /// empty Basic token when no credential is stored
    #[must_use]
    pub fn require_credential(mut self, require: bool) -> Self {
        self.require_credential = require;
        self
    }

    /// Underlying transport, for requests that must not carry a credential
    pub const fn http(&self) -> &Client {
        &self.http
    }

    /// `Authorization` header for the credential current right now
    pub fn authorization(&self) -> Result<HeaderValue, FetchError> {
        let token = match self.credentials.basic_token() {
            Some(token) => token,
            None if self.require_credential => return Err(FetchError::MissingCredential),
            None => String::new(),
        };
        let mut value = HeaderValue::from_str(&format!("Basic {token}"))?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Build the request `fetch` would send, without sending it.
    ///
    /// Caller headers are applied on top of the injected `Authorization`
    /// header. A caller-supplied `Authorization` replaces the stored
    /// credential. A multipart body supplies its own `Content-Type` with the
    /// form boundary, so a caller `Content-Type` is dropped in that case only.
    pub fn build_request<U: IntoUrl>(
        &self,
        target: U,
        options: RequestOptions,
    ) -> Result<Request, FetchError> {
        let RequestOptions {
            method,
            headers: mut caller_headers,
            query,
            body,
            timeout,
        } = options;

        if matches!(body, Some(RequestBody::Multipart(_)))
            && caller_headers.remove(CONTENT_TYPE).is_some()
        {
            debug!("multipart body replaces the caller-supplied Content-Type");
        }

        let mut headers = HeaderMap::new();
        if caller_headers.contains_key(AUTHORIZATION) {
            debug!("caller-supplied Authorization header replaces the stored credential");
        } else {
            headers.insert(AUTHORIZATION, self.authorization()?);
        }
        headers.extend(caller_headers);

        let mut builder = self
            .http
            .request(method.unwrap_or(Method::GET), target)
            .headers(headers);

        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder = match body {
            None => builder,
            Some(RequestBody::Bytes(bytes)) => builder.body(bytes),
            Some(RequestBody::Text(text)) => builder.body(text),
            Some(RequestBody::Json(value)) => builder.json(&value),
            Some(RequestBody::Multipart(form)) => builder.multipart(form),
        };

        Ok(builder.build()?)
    }

    /// Send an authorized request
    #[instrument(skip_all)]
    pub async fn fetch<U: IntoUrl>(
        &self,
        target: U,
        options: RequestOptions,
    ) -> Result<Response, FetchError> {
        let request = self.build_request(target, options)?;
        debug!(method = %request.method(), url = %request.url(), "sending authorized request");

        let response = self.http.execute(request).await?;
        debug!(status = %response.status(), "authorized request completed");
        Ok(response)
    }
}

impl std::fmt::Debug for AuthorizedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizedClient")
            .field("require_credential", &self.require_credential)
            .finish_non_exhaustive()
    }
}
