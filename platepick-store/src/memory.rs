//! In-memory key-value backend.

use std::collections::HashMap;

use crate::{KeyValueStore, StorageError, validate_key};

/// Key-value store held entirely in memory.
///
/// Useful for tests and for sessions that should not persist anything.
///
/// # Examples
/// ```
/// use platepick_store::{KeyValueStore, MemoryKeyValueStore};
///
/// let mut store = MemoryKeyValueStore::default();
/// store.write("greeting", "hello")?;
/// assert_eq!(store.read("greeting")?.as_deref(), Some("hello"));
/// assert_eq!(store.read("missing")?, None);
/// # Ok::<(), platepick_store::StorageError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryKeyValueStore {
    entries: HashMap<String, String>,
}

impl MemoryKeyValueStore {
    /// Create a store pre-populated with `entries`.
    #[must_use]
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
