//! `bucket login`: store a credential.

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::cli::session::Session;
use crate::domain::models::{Config, KeyPair};

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Bucket key id (must not contain ':')
    #[arg(long, requires = "key", conflicts_with = "token")]
    pub key_id: Option<String>,

    /// Bucket key secret
    #[arg(long, requires = "key_id")]
    pub key: Option<String>,

    /// Pre-encoded Basic token
    #[arg(long)]
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginOutput {
    pub success: bool,
    pub slot: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
}

impl CommandOutput for LoginOutput {
    fn to_human(&self) -> String {
        match &self.key_id {
            Some(key_id) => format!("Saved key {key_id} to slot '{}'", self.slot),
            None => format!("Saved token to slot '{}'", self.slot),
        }
    }
}

pub async fn execute(args: LoginArgs, config: &Config, json_mode: bool) -> Result<()> {
    let session = Session::open(&config.credentials);

    match (args.key_id, args.key, args.token) {
        (Some(key_id), Some(key), None) => session.store_key_pair(KeyPair::new(key_id, key))?,
        (None, None, Some(token)) => session.store_token(&token)?,
        _ => bail!("Provide either --key-id with --key, or --token"),
    }

    let status = session.status();
    output(
        &LoginOutput {
            success: true,
            slot: status.slot,
            key_id: status.key_id,
        },
        json_mode,
    );
    Ok(())
}
