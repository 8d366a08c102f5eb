//! `bucket upload`: send files to the bucket.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use uuid::Uuid;

use crate::cli::output::{output, CommandOutput};
use crate::cli::session::Session;
use crate::domain::models::Config;
use crate::domain::ports::{BucketApi, UploadFile};

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Files to upload
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct UploadOutput {
    pub ids: Vec<Uuid>,
}

impl CommandOutput for UploadOutput {
    fn to_human(&self) -> String {
        if self.ids.is_empty() {
            return "Nothing uploaded.".to_string();
        }
        let mut lines = vec![format!("Uploaded {} file(s):", self.ids.len())];
        lines.extend(self.ids.iter().map(|id| format!("  {id}")));
        lines.join("\n")
    }
}

async fn read_upload(path: &Path) -> Result<UploadFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
    Ok(UploadFile::new(name, bytes))
}

pub async fn execute(args: UploadArgs, config: &Config, json_mode: bool) -> Result<()> {
    let mut files = Vec::with_capacity(args.files.len());
    for path in &args.files {
        files.push(read_upload(path).await?);
    }

    let ids = Session::open(&config.credentials)
        .bucket_client(config)?
        .upload(files)
        .await
        .context("Upload failed")?;

    output(&UploadOutput { ids }, json_mode);
    Ok(())
}
