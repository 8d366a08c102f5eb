//! `bucket download`: fetch a stored file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use uuid::Uuid;

use crate::cli::output::{output, CommandOutput};
use crate::cli::session::Session;
use crate::domain::models::Config;
use crate::domain::ports::BucketApi;

#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Id returned by `bucket upload`
    pub file_id: Uuid,

    /// Destination path (defaults to <FILE_ID>.png)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl DownloadArgs {
    pub fn destination(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.png", self.file_id)))
    }
}

#[derive(Debug, Serialize)]
pub struct DownloadOutput {
    pub file_id: Uuid,
    pub path: String,
    pub bytes: usize,
}

impl CommandOutput for DownloadOutput {
    fn to_human(&self) -> String {
        format!("Saved {} ({} bytes) to {}", self.file_id, self.bytes, self.path)
    }
}

pub async fn execute(args: DownloadArgs, config: &Config, json_mode: bool) -> Result<()> {
    let bytes = Session::open(&config.credentials)
        .bucket_client(config)?
        .download(args.file_id)
        .await
        .context("Download failed")?;

    let path = args.destination();
    tokio::fs::write(&path, &bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    output(
        &DownloadOutput {
            file_id: args.file_id,
            path: path.display().to_string(),
            bytes: bytes.len(),
        },
        json_mode,
    );
    Ok(())
}
