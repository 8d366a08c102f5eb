//! Bucket CLI entry point.

use clap::Parser;

use bucket_client::cli::{dispatch, handle_error, Cli};
use bucket_client::infrastructure::config::ConfigLoader;
use bucket_client::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
    .unwrap_or_else(|err| handle_error(&err, cli.json));

    // Keep the guard alive so buffered file logs are flushed on exit.
    let _logger = LoggerImpl::init(&LogConfig::from(&config.logging))
        .unwrap_or_else(|err| handle_error(&err, cli.json));

    if let Err(err) = dispatch(cli.command, &config, cli.json).await {
        handle_error(&err, cli.json);
    }
}
