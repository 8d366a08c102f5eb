use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, warn};

use crate::domain::error::StorageError;
use crate::domain::ports::SlotStorage;

type Items = BTreeMap<String, String>;

/// Slot storage backed by a single JSON object file
///
/// The file holds every slot, e.g. `{"auth-key": "..."}`. Writes go to a
/// sibling temp file that is renamed over the original, so readers never see
/// a half-written file. Writers within one process are serialized; writers
/// in separate processes are last-write-wins.
#[derive(Debug)]
pub struct FileSlotStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSlotStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_items(&self) -> Result<Items, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Items::new()),
            Err(err) => return Err(self.io_error(err)),
        };
        if content.trim().is_empty() {
            return Ok(Items::new());
        }
        serde_json::from_str(&content).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Read the current map for modification, replacing a corrupt file
    fn read_items_for_write(&self) -> Result<Items, StorageError> {
        match self.read_items() {
            Err(StorageError::Corrupt { path, source }) => {
                warn!(path = %path.display(), error = %source, "replacing corrupt slot storage file");
                Ok(Items::new())
            }
            other => other,
        }
    }

    fn write_items(&self, items: &Items) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }

        let content = serde_json::to_string_pretty(items).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, content).map_err(|err| self.io_error(err))?;
        fs::rename(&tmp, &self.path).map_err(|err| self.io_error(err))?;
        debug!(path = %self.path.display(), slots = items.len(), "slot storage written");
        Ok(())
    }

    fn modify<F>(&self, f: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut Items) -> bool,
    {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut items = self.read_items_for_write()?;
        if f(&mut items) {
            self.write_items(&items)?;
        }
        Ok(())
    }
}

impl SlotStorage for FileSlotStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_items()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.modify(|items| {
            items.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.modify(|items| items.remove(key).is_some())
    }
}
