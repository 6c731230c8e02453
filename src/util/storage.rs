//! Key-value persistence seam.
//!
//! SYSTEM CONTEXT
//! ==============
//! The store name is the only value that survives a reload. State code talks
//! to [`KeyValueStore`]; the browser implementation is [`LocalStore`], backed
//! by `window.localStorage`. Outside a `csr` build `LocalStore` holds nothing
//! and refuses writes.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("local storage is unavailable")]
    Unavailable,
    #[error("local storage write failed: {0}")]
    Write(String),
}

/// String-keyed persistent storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// Persist `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when storage is missing or the write is
    /// refused (quota, privacy mode).
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Browser `localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            let storage = local_storage().ok_or(StorageError::Unavailable)?;
            storage
                .set_item(key, value)
                .map_err(|e| StorageError::Write(format!("{e:?}")))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
            Err(StorageError::Unavailable)
        }
    }
}
