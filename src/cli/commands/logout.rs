//! `bucket logout`: remove the stored credential.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::cli::session::Session;
use crate::domain::models::Config;

#[derive(Debug, Serialize)]
pub struct LogoutOutput {
    pub success: bool,
    pub slot: String,
    pub was_present: bool,
}

impl CommandOutput for LogoutOutput {
    fn to_human(&self) -> String {
        if self.was_present {
            format!("Removed credential from slot '{}'", self.slot)
        } else {
            format!("No credential stored in slot '{}'", self.slot)
        }
    }
}

pub async fn execute(config: &Config, json_mode: bool) -> Result<()> {
    let session = Session::open(&config.credentials);
    let was_present = session.status().present;
    session.clear()?;

    output(
        &LogoutOutput {
            success: true,
            slot: config.credentials.slot.clone(),
            was_present,
        },
        json_mode,
    );
    Ok(())
}
