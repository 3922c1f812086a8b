//! # Key-value persistence seam
//!
//! [`KeyValueStore`] is the synchronous string store that backs every piece of
//! state the app keeps across reloads: the session and the applicant review
//! ledger. Implementations live in sibling modules ([`crate::memory`] for tests
//! and native builds, `crate::local` for the browser's `localStorage`).
//!
//! Keys are plain strings. Writers that need isolation build a namespaced key
//! with [`namespaced`].

/// Synchronous string key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

/// `"<prefix>.<key>"`, or just `key` for an empty prefix.
pub fn namespaced(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Seconds since the Unix epoch.
pub fn current_timestamp() -> i64 {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        (js_sys::Date::now() / 1000.0) as i64
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }
}
