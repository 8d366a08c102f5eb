//! CLI command implementations.

pub mod download;
pub mod fetch;
pub mod issue_key;
pub mod login;
pub mod logout;
pub mod status;
pub mod upload;
