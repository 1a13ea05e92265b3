//! Durable key-value storage seam.
//!
//! Mirrors the browser `localStorage` contract: string keys, string values,
//! one key per collection. Front ends provide the backing store (session,
//! file, memory); the shop only ever reads and writes whole collections
//! through [`load_json`] and [`save_json`].

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Storage key holding the serialized cart.
pub const CART_KEY: &str = "cart";

/// Storage key holding the serialized wishlist.
pub const WISHLIST_KEY: &str = "wishlist";

/// Origin-scoped string storage.
///
/// Writes are assumed to succeed; backends that can fail report it when
/// they are flushed, outside the store operations.
pub trait KeyValueStore {
    /// Read the raw value for `key`.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Replace the value for `key`.
    fn set_item(&mut self, key: &str, value: String);
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: String) {
        (**self).set_item(key, value);
    }
}

/// In-memory store, for tests and for snapshotting other backends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_owned(), value);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryStore {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Load a JSON value stored under `key`.
///
/// Absent and unparseable values both come back as `None`; corrupt data is
/// logged and otherwise treated as never written.
pub fn load_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get_item(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding unreadable stored value");
            None
        }
    }
}

/// Serialize `value` as JSON and store it under `key`.
pub fn save_json<T: Serialize + ?Sized>(store: &mut impl KeyValueStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => store.set_item(key, raw),
        Err(e) => tracing::error!(key, error = %e, "Failed to serialize value for storage"),
    }
}
