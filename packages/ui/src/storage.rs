//! Shared storage constructor for all platforms.
//!
//! Returns the [`store::KeyValueStore`] the session and the review ledger are
//! persisted in:
//! - **Web** (WASM + `web` feature): `window.localStorage` via [`store::LocalStorage`]
//! - **Native** (tests, tooling): process memory via [`store::MemoryStorage`]

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStorage = store::LocalStorage;

#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformStorage = store::MemoryStorage;

/// Create the platform-appropriate key-value store.
pub fn make_storage() -> PlatformStorage {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStorage::new()
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        store::MemoryStorage::new()
    }
}
