//! `bucket issue-key`: ask the server for a new key.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::cli::session::Session;
use crate::domain::models::{Config, KeyPair};
use crate::domain::ports::BucketApi;

#[derive(Args, Debug)]
pub struct IssueKeyArgs {
    /// Print the key without storing it
    #[arg(long)]
    pub no_save: bool,
}

#[derive(Debug, Serialize)]
pub struct IssueKeyOutput {
    #[serde(flatten)]
    pub pair: KeyPair,
    pub saved: bool,
}

impl CommandOutput for IssueKeyOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![
            format!("Key id: {}", self.pair.key_id),
            format!("Key:    {}", self.pair.key),
        ];
        if self.saved {
            lines.push("Saved as the current credential".to_string());
        }
        lines.join("\n")
    }
}

pub async fn execute(args: IssueKeyArgs, config: &Config, json_mode: bool) -> Result<()> {
    let session = Session::open(&config.credentials);
    let pair = session
        .bucket_client(config)?
        .issue_key()
        .await
        .context("Failed to issue key")?;

    if !args.no_save {
        session.store_key_pair(pair.clone())?;
    }

    output(
        &IssueKeyOutput {
            pair,
            saved: !args.no_save,
        },
        json_mode,
    );
    Ok(())
}
