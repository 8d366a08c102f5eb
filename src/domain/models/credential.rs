//! Credential shapes held by the credential store.
//!
//! Two mutually exclusive shapes exist, one per slot format:
//! - a raw token (`String`), sent verbatim after `Basic `
//! - a [`KeyPair`], sent as `base64(keyId:key)`

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::domain::error::CodecError;

/// Key id and secret issued by the bucket server
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPair {
    /// Identifier of the bucket key (a UUID on the reference server).
    /// Must not contain `:`; see [`KeyPair::validate`].
    pub key_id: String,

    /// Secret half of the key
    pub key: String,
}

impl KeyPair {
    pub fn new(key_id: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key: key.into(),
        }
    }

    /// Check that the pair survives a round trip through its Basic token.
    ///
    /// The token is `base64(keyId:key)` and is split at the first `:`, so a
    /// key id containing `:` would come back as a different pair.
    pub fn validate(&self) -> Result<(), CodecError> {
        if self.key_id.contains(':') {
            return Err(CodecError::InvalidKeyId(self.key_id.clone()));
        }
        Ok(())
    }

    /// Parse a raw Basic token (`base64(keyId:key)`) back into a key pair.
    ///
    /// Returns `None` when the token is not padded standard base64, is not
    /// UTF-8, or has no `:` delimiter.
    pub fn from_basic_token(token: &str) -> Option<Self> {
        let decoded = STANDARD.decode(token.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (key_id, key) = decoded.split_once(':')?;
        if key_id.is_empty() {
            return None;
        }
        Some(Self::new(key_id, key))
    }

    /// Key with everything but the last four characters hidden
    pub fn masked_key(&self) -> String {
        mask_secret(&self.key)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("key_id", &self.key_id)
            .field("key", &self.masked_key())
            .finish()
    }
}

/// A credential that can be rendered into a Basic `Authorization` header
pub trait BasicCredential {
    /// Token placed after `Basic ` in the header
    fn basic_token(&self) -> String;
}

impl BasicCredential for String {
    fn basic_token(&self) -> String {
        self.clone()
    }
}

impl BasicCredential for KeyPair {
    fn basic_token(&self) -> String {
        STANDARD.encode(format!("{}:{}", self.key_id, self.key))
    }
}

/// Hide all but the last four characters of a secret
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let visible: String = secret.chars().skip(count - 4).collect();
    format!("{}{visible}", "*".repeat(count - 4))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_pair_json_shape() {
        let pair = KeyPair::new("195ea586-110f-454a-a7e6-87bbec64c41c", "secret");
        let json = serde_json::to_value(&pair).unwrap();
        assert_eq!(json["keyId"], "195ea586-110f-454a-a7e6-87bbec64c41c");
        assert_eq!(json["key"], "secret");
    }

    #[test]
    fn test_key_pair_basic_token() {
        let pair = KeyPair::new("id", "key");
        // base64("id:key")
        assert_eq!(pair.basic_token(), "aWQ6a2V5");
    }

    #[test]
    fn test_raw_token_is_verbatim() {
        assert_eq!("abc123".to_string().basic_token(), "abc123");
    }

    #[test]
    fn test_from_basic_token_inverts_encoding() {
        let pair = KeyPair::new("195ea586-110f-454a-a7e6-87bbec64c41c", "p:with:colons");
        let parsed = KeyPair::from_basic_token(&pair.basic_token()).unwrap();
        assert_eq!(parsed, pair);
    }

    #[test]
    fn test_from_basic_token_rejects_garbage() {
        assert!(KeyPair::from_basic_token("not base64 at all").is_none());
        // base64("nodelimiter")
        assert!(KeyPair::from_basic_token("bm9kZWxpbWl0ZXI=").is_none());
        // base64(":key"), empty key id
        assert!(KeyPair::from_basic_token("OmtleQ==").is_none());
    }

    #[test]
    fn test_validate_rejects_delimiter_in_key_id() {
        assert!(KeyPair::new("195ea586-110f-454a-a7e6-87bbec64c41c", "a:b").validate().is_ok());
        assert!(matches!(
            KeyPair::new("tenant:42", "key").validate(),
            Err(CodecError::InvalidKeyId(ref id)) if id == "tenant:42"
        ));
    }

    #[test]
    fn test_debug_masks_key() {
        let pair = KeyPair::new("id", "ee014d6f-5798");
        let debug = format!("{pair:?}");
        assert!(!debug.contains("ee014d6f"));
        assert!(debug.contains("5798"));
    }

    #[test]
    fn test_mask_secret_short_values() {
        assert_eq!(mask_secret(""), "");
        assert_eq!(mask_secret("abcd"), "****");
        assert_eq!(mask_secret("abcdef"), "**cdef");
    }
}
