use crate::domain::error::StorageError;

/// Port for a durable key-value slot store
///
/// Mirrors browser local storage: string keys, string values, and an entry
/// that survives the process. Implementations must be safe to share across
/// threads; every call is synchronous.
pub trait SlotStorage: Send + Sync {
    /// Read the value stored under `key`, if any
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the entry under `key`; removing a missing entry is not an error
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
