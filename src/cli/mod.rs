//! Command-line interface for the bucket client.

pub mod commands;
pub mod output;
pub mod session;
pub mod types;

pub use types::{Cli, Commands};

use anyhow::Result;

use crate::domain::models::Config;

/// Run a parsed command against loaded configuration
pub async fn dispatch(command: Commands, config: &Config, json_mode: bool) -> Result<()> {
    match command {
        Commands::Login(args) => commands::login::execute(args, config, json_mode).await,
        Commands::Logout => commands::logout::execute(config, json_mode).await,
        Commands::Status => commands::status::execute(config, json_mode).await,
        Commands::IssueKey(args) => commands::issue_key::execute(args, config, json_mode).await,
        Commands::Upload(args) => commands::upload::execute(args, config, json_mode).await,
        Commands::Download(args) => commands::download::execute(args, config, json_mode).await,
        Commands::Fetch(args) => commands::fetch::execute(args, config, json_mode).await,
    }
}

/// Report an error in the selected output mode and exit with status 1
pub fn handle_error(err: &anyhow::Error, json_mode: bool) -> ! {
    eprintln!("{}", output::error_output(err, json_mode));
    std::process::exit(1)
}
