/// Port through which authorized requests read the current credential
///
/// Each call is one synchronous snapshot; implementations must return the
/// value current at call time, never a value captured earlier.
pub trait CredentialSource: Send + Sync {
    /// Token to place after `Basic ` in the `Authorization` header, or
    /// `None` when no credential is configured
    fn basic_token(&self) -> Option<String>;
}

/// Fixed credential, for requests that never consult a store
#[derive(Debug, Clone, Default)]
pub struct StaticCredential(Option<String>);

impl StaticCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    /// Source that never yields a credential
    pub const fn none() -> Self {
        Self(None)
    }
}

impl CredentialSource for StaticCredential {
    fn basic_token(&self) -> Option<String> {
        self.0.clone()
    }
}
