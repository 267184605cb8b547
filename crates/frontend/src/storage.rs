//! Browser local storage behind the session store

use gloo::storage::{LocalStorage, Storage};
use quill_core::{StateStorage, StorageError};

/// `window.localStorage`, read and written as raw strings
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BrowserStorage;

impl StateStorage for BrowserStorage {
    fn load(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| StorageError(format!("{e:?}")))
    }

    fn remove(&self, key: &str) {
        LocalStorage::delete(key);
    }
}
