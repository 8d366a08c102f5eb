//! `bucket fetch`: send an arbitrary request with the stored credential.

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::cli::session::Session;
use crate::domain::models::Config;
use crate::infrastructure::http::{RequestBody, RequestOptions};

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Absolute URL, or a path starting with `/` resolved against the server
    pub target: String,

    /// HTTP method
    #[arg(short = 'X', long, default_value = "GET")]
    pub method: String,

    /// Extra header as "Name: value" (repeatable)
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,

    /// Request body
    #[arg(short, long)]
    pub data: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FetchOutput {
    pub status: u16,
    pub body: String,
}

impl CommandOutput for FetchOutput {
    fn to_human(&self) -> String {
        if self.body.is_empty() {
            return self.status.to_string();
        }
        format!("{}\n{}", self.status, self.body)
    }
}

/// Parse a curl-style `Name: value` header
pub fn parse_header(raw: &str) -> Result<(HeaderName, HeaderValue)> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| anyhow!("Invalid header '{raw}', expected 'Name: value'"))?;
    let name = HeaderName::from_bytes(name.trim().as_bytes())
        .with_context(|| format!("Invalid header name in '{raw}'"))?;
    let value = HeaderValue::from_str(value.trim())
        .with_context(|| format!("Invalid header value in '{raw}'"))?;
    Ok((name, value))
}

fn parse_method(raw: &str) -> Result<Method> {
    let upper = raw.to_ascii_uppercase();
    Method::from_bytes(upper.as_bytes()).map_err(|_| anyhow!("Invalid HTTP method '{raw}'"))
}

/// Resolve a target against the configured server
pub fn resolve_target(target: &str, base_url: &str) -> String {
    if target.starts_with('/') {
        format!("{}{target}", base_url.trim_end_matches('/'))
    } else {
        target.to_string()
    }
}

/// Translate command-line arguments into request options
pub fn build_options(args: &FetchArgs) -> Result<RequestOptions> {
    let mut options = RequestOptions::new().method(parse_method(&args.method)?);
    for raw in &args.headers {
        let (name, value) = parse_header(raw)?;
        options = options.header(name, value);
    }
    if let Some(data) = &args.data {
        if options.method == Some(Method::GET) {
            bail!("GET requests cannot carry --data; pass -X POST or another method");
        }
        options = options.body(RequestBody::Text(data.clone()));
    }
    Ok(options)
}

pub async fn execute(args: FetchArgs, config: &Config, json_mode: bool) -> Result<()> {
    let options = build_options(&args)?;
    let url = resolve_target(&args.target, &config.server.base_url);

    let client = Session::open(&config.credentials).bucket_client(config)?;
    let response = client
        .authorized()
        .fetch(url.as_str(), options)
        .await
        .with_context(|| format!("Request to {url} failed"))?;

    let status = response.status().as_u16();
    let body = response.text().await.context("Failed to read response body")?;
    output(&FetchOutput { status, body }, json_mode);
    Ok(())
}
