//! # `localStorage` key-value store: browser-side persistence
//!
//! [`LocalStorage`] is the [`KeyValueStore`] implementation used on the **web
//! platform**. It reads and writes the window's `localStorage` through
//! `web-sys`.
//!
//! ## Connection management
//!
//! `LocalStorage` is a zero-size handle that looks up `window.localStorage` on
//! every operation, so it can be copied freely into closures and contexts.
//!
//! ## Error handling
//!
//! Storage can be unavailable (private browsing, quota exceeded, disabled by
//! policy). Reads then return `None` and writes are dropped with a warning: the
//! app degrades to "nothing persisted" rather than failing.

use tracing::warn;
use web_sys::Storage;

use crate::kv::KeyValueStore;

/// `window.localStorage`-backed KeyValueStore.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Option<Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = self.storage() else {
            warn!("localStorage unavailable, dropping write to {key}");
            return;
        };
        if let Err(e) = storage.set_item(key, value) {
            warn!("Failed to write {key} to localStorage: {e:?}");
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.storage() {
            if let Err(e) = storage.remove_item(key) {
                warn!("Failed to remove {key} from localStorage: {e:?}");
            }
        }
    }
}
