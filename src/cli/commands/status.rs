//! `bucket status`: report the stored credential without revealing it.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::cli::session::{CredentialStatus, Session};
use crate::domain::models::Config;

#[derive(Debug, Serialize)]
pub struct StatusOutput {
    pub server: String,
    pub storage_path: String,
    #[serde(flatten)]
    pub credential: CredentialStatus,
}

impl CommandOutput for StatusOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![
            format!("Server:   {}", self.server),
            format!("Storage:  {} (slot '{}')", self.storage_path, self.credential.slot),
        ];
        match (&self.credential.key_id, &self.credential.masked) {
            (Some(key_id), Some(masked)) => {
                lines.push(format!("Key id:   {key_id}"));
                lines.push(format!("Key:      {masked}"));
            }
            (None, Some(masked)) => lines.push(format!("Token:    {masked}")),
            _ => lines.push("Not logged in".to_string()),
        }
        lines.join("\n")
    }
}

pub async fn execute(config: &Config, json_mode: bool) -> Result<()> {
    let session = Session::open(&config.credentials);
    output(
        &StatusOutput {
            server: config.server.base_url.clone(),
            storage_path: config.credentials.storage_path.display().to_string(),
            credential: session.status(),
        },
        json_mode,
    );
    Ok(())
}
