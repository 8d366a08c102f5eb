//! Slot encodings for the credential store.

use tracing::info;

use crate::domain::error::CodecError;
use crate::domain::models::KeyPair;

/// Conversion between a credential value and its durable slot string
pub trait SlotCodec: Send + Sync + 'static {
    /// Credential shape this codec persists
    type Value: Clone + Send + Sync + 'static;

    /// Encode a present credential for the slot
    fn encode(&self, value: &Self::Value) -> Result<String, CodecError>;

    /// Decode a slot string; `Ok(None)` is an explicitly empty credential
    fn decode(&self, raw: &str) -> Result<Option<Self::Value>, CodecError>;

    /// Interpret a slot string written by an older encoding
    ///
    /// Only consulted after [`decode`](Self::decode) fails.
    fn migrate_legacy(&self, _raw: &str) -> Option<Self::Value> {
        None
    }
}

/// Opaque token stored verbatim
#[derive(Debug, Clone, Copy, Default)]
pub struct RawTokenCodec;

impl SlotCodec for RawTokenCodec {
    type Value = String;

    fn encode(&self, value: &Self::Value) -> Result<String, CodecError> {
        Ok(value.clone())
    }

    fn decode(&self, raw: &str) -> Result<Option<Self::Value>, CodecError> {
        Ok(Some(raw.to_string()))
    }
}

/// JSON-encoded [`KeyPair`]
#[derive(Debug, Clone, Copy)]
pub struct KeyPairCodec {
    migrate_legacy: bool,
}

impl KeyPairCodec {
    /// Codec that also accepts legacy raw tokens of the form `base64(keyId:key)`
    pub const fn new() -> Self {
        Self {
            migrate_legacy: true,
        }
    }

    /// Codec that treats anything but JSON as undecodable
    pub const fn strict() -> Self {
        Self {
            migrate_legacy: false,
        }
    }

    pub const fn with_legacy_migration(migrate_legacy: bool) -> Self {
        Self { migrate_legacy }
    }
}

impl Default for KeyPairCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotCodec for KeyPairCodec {
    type Value = KeyPair;

    fn encode(&self, value: &KeyPair) -> Result<String, CodecError> {
        serde_json::to_string(value).map_err(CodecError::Encode)
    }

    fn decode(&self, raw: &str) -> Result<Option<KeyPair>, CodecError> {
        serde_json::from_str::<Option<KeyPair>>(raw).map_err(CodecError::Decode)
    }

    fn migrate_legacy(&self, raw: &str) -> Option<KeyPair> {
        if !self.migrate_legacy {
            return None;
        }
        let pair = KeyPair::from_basic_token(raw)?;
        info!(key_id = %pair.key_id, "recognized legacy raw token in key pair slot");
        Some(pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::BasicCredential;

    #[test]
    fn test_raw_codec_is_identity() {
        let codec = RawTokenCodec;
        assert_eq!(codec.encode(&"tok".to_string()).unwrap(), "tok");
        assert_eq!(codec.decode("tok").unwrap(), Some("tok".to_string()));
        assert!(codec.migrate_legacy("tok").is_none());
    }

    #[test]
    fn test_key_pair_codec_decodes_null_as_empty() {
        assert_eq!(KeyPairCodec::new().decode("null").unwrap(), None);
    }

    #[test]
    fn test_key_pair_codec_rejects_wrong_shape() {
        let codec = KeyPairCodec::new();
        assert!(matches!(
            codec.decode(r#"{"id": "x"}"#),
            Err(CodecError::Decode(_))
        ));
        assert!(codec.decode("plain text").is_err());
    }

    #[test]
    fn test_key_pair_codec_encodes_camel_case() {
        let encoded = KeyPairCodec::new()
            .encode(&KeyPair::new("id-1", "secret"))
            .unwrap();
        assert_eq!(encoded, r#"{"keyId":"id-1","key":"secret"}"#);
    }

    #[test]
    fn test_legacy_migration_respects_flag() {
        let legacy = KeyPair::new("id-1", "secret").basic_token();
        assert_eq!(
            KeyPairCodec::new().migrate_legacy(&legacy),
            Some(KeyPair::new("id-1", "secret"))
        );
        assert_eq!(KeyPairCodec::strict().migrate_legacy(&legacy), None);
    }
}
