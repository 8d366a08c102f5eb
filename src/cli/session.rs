//! Credential store wiring shared by the CLI commands.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use crate::domain::models::{mask_secret, BasicCredential, Config, CredentialsConfig, KeyPair, SlotFormat};
use crate::domain::ports::{CredentialSource, SlotStorage};
use crate::infrastructure::http::{AuthorizedClient, BucketClient};
use crate::infrastructure::storage::FileSlotStorage;
use crate::services::{CredentialStore, KeyPairCodec, RawTokenCodec};

/// Credential store opened in the configured slot format
#[derive(Debug, Clone)]
pub enum Session {
    Raw(CredentialStore<RawTokenCodec>),
    KeyPair(CredentialStore<KeyPairCodec>),
}

/// Credential presence as reported by `bucket status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialStatus {
    pub slot: String,
    pub format: SlotFormat,
    pub present: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masked: Option<String>,
}

impl Session {
    /// Open the file-backed slot named in configuration
    pub fn open(config: &CredentialsConfig) -> Self {
        Self::with_storage(config, Arc::new(FileSlotStorage::new(&config.storage_path)))
    }

    pub fn with_storage(config: &CredentialsConfig, storage: Arc<dyn SlotStorage>) -> Self {
        match config.format {
            SlotFormat::Raw => Self::Raw(CredentialStore::load(storage, &config.slot, RawTokenCodec)),
            SlotFormat::Json => Self::KeyPair(CredentialStore::load(
                storage,
                &config.slot,
                KeyPairCodec::with_legacy_migration(config.migrate_legacy),
            )),
        }
    }

    pub const fn format(&self) -> SlotFormat {
        match self {
            Self::Raw(_) => SlotFormat::Raw,
            Self::KeyPair(_) => SlotFormat::Json,
        }
    }

    /// The store as a credential source for outgoing requests
    pub fn source(&self) -> Arc<dyn CredentialSource> {
        match self {
            Self::Raw(store) => Arc::new(store.clone()),
            Self::KeyPair(store) => Arc::new(store.clone()),
        }
    }

    pub fn status(&self) -> CredentialStatus {
        let (slot, key_id, masked) = match self {
            Self::Raw(store) => (store.slot(), None, store.get().map(|token| mask_secret(&token))),
            Self::KeyPair(store) => {
                let pair = store.get();
                (
                    store.slot(),
                    pair.as_ref().map(|pair| pair.key_id.clone()),
                    pair.as_ref().map(KeyPair::masked_key),
                )
            }
        };

        CredentialStatus {
            slot: slot.to_string(),
            format: self.format(),
            present: masked.is_some(),
            key_id,
            masked,
        }
    }

    /// Store a key pair in whichever shape the slot holds
    pub fn store_key_pair(&self, pair: KeyPair) -> Result<()> {
        pair.validate()?;
        match self {
            Self::Raw(store) => store.set(Some(pair.basic_token())),
            Self::KeyPair(store) => store.set(Some(pair)),
        }
        .context("Failed to save credential")
    }

    /// Store a raw Basic token
    ///
    /// A key pair slot only accepts tokens that decode to `keyId:key`.
    pub fn store_token(&self, token: &str) -> Result<()> {
        match self {
            Self::Raw(store) => store
                .set(Some(token.to_string()))
                .context("Failed to save credential"),
            Self::KeyPair(_) => match KeyPair::from_basic_token(token) {
                Some(pair) => self.store_key_pair(pair),
                None => bail!(
                    "Token is not base64(keyId:key); use --key-id and --key, or set credentials.format to raw"
                ),
            },
        }
    }

    pub fn clear(&self) -> Result<()> {
        match self {
            Self::Raw(store) => store.clear(),
            Self::KeyPair(store) => store.clear(),
        }
        .context("Failed to remove credential")
    }

    /// Bucket API client signing with this session's credential
    pub fn bucket_client(&self, config: &Config) -> Result<BucketClient> {
        let client = AuthorizedClient::with_config(&config.http, self.source())
            .context("Failed to build HTTP client")?;
        Ok(BucketClient::new(&config.server.base_url, client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::MemorySlotStorage;

    fn config(format: SlotFormat) -> CredentialsConfig {
        CredentialsConfig {
            format,
            ..CredentialsConfig::default()
        }
    }

    #[test]
    fn test_key_pair_session_round_trips_through_storage() {
        let storage = Arc::new(MemorySlotStorage::new());
        let session = Session::with_storage(&config(SlotFormat::Json), storage.clone());
        session.store_key_pair(KeyPair::new("id", "secret-key")).unwrap();

        assert_eq!(
            storage.get_item("auth-key").unwrap().as_deref(),
            Some(r#"{"keyId":"id","key":"secret-key"}"#)
        );
        let status = session.status();
        assert!(status.present);
        assert_eq!(status.key_id.as_deref(), Some("id"));
        assert_eq!(session.source().basic_token().as_deref(), Some("aWQ6c2VjcmV0LWtleQ=="));
    }

    #[test]
    fn test_raw_session_stores_basic_token_for_key_pair() {
        let storage = Arc::new(MemorySlotStorage::new());
        let session = Session::with_storage(&config(SlotFormat::Raw), storage.clone());
        session.store_key_pair(KeyPair::new("id", "key")).unwrap();
        assert_eq!(storage.get_item("auth-key").unwrap().as_deref(), Some("aWQ6a2V5"));
    }

    #[test]
    fn test_key_pair_session_rejects_opaque_token() {
        let session = Session::with_storage(&config(SlotFormat::Json), Arc::new(MemorySlotStorage::new()));
        assert!(session.store_token("opaque").is_err());
        session.store_token("aWQ6a2V5").unwrap();
        assert_eq!(session.status().key_id.as_deref(), Some("id"));
    }

    #[test]
    fn test_key_id_with_delimiter_is_not_stored() {
        let storage = Arc::new(MemorySlotStorage::new());
        for format in [SlotFormat::Json, SlotFormat::Raw] {
            let session = Session::with_storage(&config(format), storage.clone());
            let err = session.store_key_pair(KeyPair::new("tenant:42", "key")).unwrap_err();
            assert!(err.to_string().contains("tenant:42"));
            assert!(!session.status().present);
        }
        assert_eq!(storage.get_item("auth-key").unwrap(), None);
    }

    #[test]
    fn test_clear_reports_absent() {
        let storage = Arc::new(MemorySlotStorage::new());
        let session = Session::with_storage(&config(SlotFormat::Raw), storage.clone());
        session.store_token("tok").unwrap();
        session.clear().unwrap();
        assert!(!session.status().present);
        assert_eq!(storage.get_item("auth-key").unwrap(), None);
    }
}
