//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands::{
    download::DownloadArgs, fetch::FetchArgs, issue_key::IssueKeyArgs, login::LoginArgs,
    upload::UploadArgs,
};

#[derive(Parser, Debug)]
#[command(name = "bucket")]
#[command(about = "Bucket storage client - credentials and authorized requests", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this YAML file instead of .bucket/
    #[arg(short, long, global = true, env = "BUCKET_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store a credential for subsequent requests
    Login(LoginArgs),

    /// Remove the stored credential
    Logout,

    /// Show whether a credential is stored
    Status,

    /// Request a new bucket key from the server
    IssueKey(IssueKeyArgs),

    /// Upload files into the bucket
    Upload(UploadArgs),

    /// Download a file from the bucket
    Download(DownloadArgs),

    /// Send an arbitrary authorized request
    Fetch(FetchArgs),
}
