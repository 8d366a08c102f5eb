use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::domain::error::StorageError;
use crate::domain::ports::SlotStorage;

/// In-process slot storage
///
/// Values live as long as the instance. Writes can be switched off to
/// simulate a backend that refuses them (a full quota, a read-only disk).
#[derive(Debug, Default)]
pub struct MemorySlotStorage {
    items: Mutex<HashMap<String, String>>,
    reject_writes: AtomicBool,
}

impl MemorySlotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with one entry
    pub fn with_item(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage
            .items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into());
        storage
    }

    /// Make subsequent `set_item`/`remove_item` calls fail (or succeed again)
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    fn check_writable(&self, key: &str) -> Result<(), StorageError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(StorageError::WriteRejected(key.to_string()));
        }
        Ok(())
    }
}

impl SlotStorage for MemorySlotStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_writable(key)?;
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.check_writable(key)?;
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}
