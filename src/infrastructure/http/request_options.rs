use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use reqwest::multipart::Form;
use reqwest::Method;

/// Body of an outbound request
#[derive(Debug)]
pub enum RequestBody {
    Bytes(Vec<u8>),
    Text(String),
    /// Serialized with `Content-Type: application/json` unless the caller set one
    Json(serde_json::Value),
    /// Sent as `multipart/form-data`; replaces any caller `Content-Type`
    Multipart(Form),
}

/// Caller-supplied request options, passed through to the transport
///
/// Every field is optional: the method defaults to `GET`, there is no body,
/// and no per-request timeout beyond the client's own.
#[derive(Debug, Default)]
pub struct RequestOptions {
    pub method: Option<Method>,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub body: Option<RequestBody>,
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Add a header value; repeated names keep every value
    #[must_use]
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn json(self, value: serde_json::Value) -> Self {
        self.body(RequestBody::Json(value))
    }

    #[must_use]
    pub fn multipart(self, form: Form) -> Self {
        self.body(RequestBody::Multipart(form))
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
