//! Common test utilities for integration tests
//!
//! Shared fixtures for the credential store and HTTP client tests.

use std::io;
use std::sync::{Arc, Mutex};

use bucket_client::{AuthorizedClient, CredentialSource, FileSlotStorage, StaticCredential};
use tempfile::TempDir;

/// Create a temporary directory for test isolation
///
/// Returns a TempDir that will be cleaned up when dropped.
#[allow(dead_code)]
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// File-backed slot storage inside a fresh temp directory
#[allow(dead_code)]
pub fn temp_storage() -> (TempDir, Arc<FileSlotStorage>) {
    let dir = temp_dir();
    let storage = Arc::new(FileSlotStorage::new(dir.path().join(".bucket").join("storage.json")));
    (dir, storage)
}

/// Authorized client signing with a fixed token
#[allow(dead_code)]
pub fn client_with_token(token: Option<&str>) -> AuthorizedClient {
    let source: Arc<dyn CredentialSource> = match token {
        Some(token) => Arc::new(StaticCredential::new(token)),
        None => Arc::new(StaticCredential::none()),
    };
    AuthorizedClient::new(reqwest::Client::new(), source)
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
#[allow(dead_code)]
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// In-memory sink for formatted log output
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    #[allow(dead_code)]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with every tracing event on this thread captured as plain text
#[allow(dead_code)]
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}
