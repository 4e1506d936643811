//! File-backed key-value store.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;

use crate::fs::{ensure_dir, open_dir};
use crate::{KeyValueStore, StorageError, validate_key};

const EXTENSION: &str = "json";

/// Store each key as `<root>/<key>.json`.
///
/// The root directory is created on the first write; reading from a root
/// that does not exist yet yields `None`. Writes go to a temporary sibling
/// and are renamed into place so a crash never leaves a truncated value.
///
/// # Examples
/// ```no_run
/// use platepick_store::{FileKeyValueStore, KeyValueStore};
///
/// let mut store = FileKeyValueStore::new(".platepick");
/// store.write("platepick_prefs", r#"{"cafe":2}"#)?;
/// assert!(store.read("platepick_prefs")?.is_some());
/// # Ok::<(), platepick_store::StorageError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileKeyValueStore {
    root: Utf8PathBuf,
}

impl FileKeyValueStore {
    /// Use `root` as the storage directory.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding stored values.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Path at which `key` is stored.
    ///
    /// # Errors
    /// Returns [`StorageError::InvalidKey`] for keys rejected by
    /// [`validate_key`].
    pub fn path_for(&self, key: &str) -> Result<Utf8PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.root.join(file_name(key)))
    }
}

fn file_name(key: &str) -> String {
    format!("{key}.{EXTENSION}")
}

fn is_not_found(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::NotFound
}

impl KeyValueStore for FileKeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        let dir = match open_dir(&self.root) {
            Ok(dir) => dir,
            Err(err) if is_not_found(&err) => return Ok(None),
            Err(source) => {
                return Err(StorageError::Root {
                    root: self.root.clone(),
                    source,
                });
            }
        };
        match dir.read_to_string(file_name(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if is_not_found(&err) => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_owned(),
                source,
            }),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let root_error = |source| StorageError::Root {
            root: self.root.clone(),
            source,
        };
        ensure_dir(&self.root).map_err(root_error)?;
        let dir = open_dir(&self.root).map_err(root_error)?;

        let target = file_name(key);
        let staging = format!("{target}.tmp");
        let write_error = |source| StorageError::Write {
            key: key.to_owned(),
            source,
        };
        dir.write(&staging, value).map_err(write_error)?;
        dir.rename(&staging, &dir, &target).map_err(write_error)?;
        debug!("stored '{key}' under {}", self.root);
        Ok(())
    }
}
