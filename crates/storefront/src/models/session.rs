//! The visitor's key-value storage, kept in their session.
//!
//! The session plays the role a browser's `localStorage` plays for a static
//! page: it is scoped to one visitor, survives page loads, and holds the
//! serialized `cart` and `wishlist` strings. A request snapshots the keys it
//! needs, runs one shop operation synchronously against the snapshot, then
//! writes back only what changed.

use std::collections::{BTreeMap, BTreeSet};

use lantern_core::KeyValueStore;
use lantern_core::storage::{CART_KEY, WISHLIST_KEY};
use tower_sessions::Session;

/// Session keys for storefront data.
pub mod keys {
    /// Prefix for entries of the visitor's key-value storage.
    pub const STORAGE_PREFIX: &str = "storage:";

    /// Key for the pending toast message.
    pub const TOAST: &str = "toast";

    /// Key for the product whose add button shows "Added!".
    pub const ADDED_PRODUCT: &str = "added_product";
}

/// Storage keys every shop operation needs.
pub const SHOP_KEYS: &[&str] = &[CART_KEY, WISHLIST_KEY];

fn session_key(key: &str) -> String {
    format!("{}{key}", keys::STORAGE_PREFIX)
}

/// Snapshot of storage entries loaded from a session.
#[derive(Debug, Clone, Default)]
pub struct SessionStorage {
    entries: BTreeMap<String, String>,
    dirty: BTreeSet<String>,
}

impl SessionStorage {
    /// Load `storage_keys` from the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub async fn load(
        session: &Session,
        storage_keys: &[&str],
    ) -> Result<Self, tower_sessions::session::Error> {
        let mut entries = BTreeMap::new();
        for key in storage_keys {
            if let Some(value) = session.get::<String>(&session_key(key)).await? {
                entries.insert((*key).to_owned(), value);
            }
        }
        Ok(Self {
            entries,
            dirty: BTreeSet::new(),
        })
    }

    /// Write every entry changed since loading back to the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be written.
    pub async fn commit(&mut self, session: &Session) -> Result<(), tower_sessions::session::Error> {
        for key in std::mem::take(&mut self.dirty) {
            if let Some(value) = self.entries.get(&key) {
                session.insert(&session_key(&key), value).await?;
            }
        }
        Ok(())
    }

    /// Whether anything changed since loading or the last commit.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }
}

impl KeyValueStore for SessionStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_owned(), value);
        self.dirty.insert(key.to_owned());
    }
}
