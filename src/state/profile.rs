//! Store profile: the store name shown in the brand tag and kept across
//! reloads.

use schedule::preview::brand_label;

use crate::util::storage::{KeyValueStore, StorageError};

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

/// Saved store name, if any.
pub fn load_store_profile(store: &impl KeyValueStore, key: &str) -> Option<String> {
    store.get(key)
}

/// Persist `value` verbatim, empty string included.
///
/// # Errors
///
/// Propagates the [`StorageError`] of the underlying store.
pub fn save_store_profile(store: &impl KeyValueStore, key: &str, value: &str) -> Result<(), StorageError> {
    store.set(key, value)
}

/// What the form shows for the store name: the input field value and the
/// brand tag text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreProfile {
    pub input: String,
    pub brand: String,
}

impl StoreProfile {
    fn from_name(name: String, placeholder: &str) -> Self {
        let brand = brand_label(&name, placeholder).to_owned();
        Self { input: name, brand }
    }

    /// Startup state. Nothing is written when no name was saved.
    pub fn restore(store: &impl KeyValueStore, key: &str, placeholder: &str) -> Self {
        let name = load_store_profile(store, key).unwrap_or_default();
        Self::from_name(name, placeholder)
    }

    /// Handle one input event: persist the raw value and mirror it.
    ///
    /// A failed write is logged; the form keeps working with the in-memory
    /// value.
    pub fn edit(store: &impl KeyValueStore, key: &str, placeholder: &str, value: String) -> Self {
        if let Err(e) = save_store_profile(store, key, &value) {
            log::warn!("store name not persisted: {e}");
        }
        Self::from_name(value, placeholder)
    }
}
