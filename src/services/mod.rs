//! Service layer
//!
//! - codec: slot encodings for credentials
//! - credential_store: the persisted, observable credential cell

pub mod codec;
pub mod credential_store;

pub use codec::{KeyPairCodec, RawTokenCodec, SlotCodec};
pub use credential_store::{CredentialStore, Subscription};
