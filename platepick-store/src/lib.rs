//! Persistence for the PlatePick recommendation engine.
//!
//! Storage is split in two layers. A [`KeyValueStore`] moves raw string
//! values in and out of some backing medium and reports every failure. The
//! [`KeyValuePreferenceStore`] adapter sits on top, encodes the preference
//! profile as a JSON object and implements the fail-soft
//! [`PreferenceStore`](platepick_core::PreferenceStore) contract: storage
//! errors are logged and never reach the caller.

#![forbid(unsafe_code)]

mod error;
mod file;
mod fs;
mod memory;
mod preferences;

pub use error::StorageError;
pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;
pub use preferences::{KeyValuePreferenceStore, PREFERENCES_KEY};

/// A string-keyed, string-valued storage medium.
pub trait KeyValueStore {
    /// Return the value stored under `key`, or `None` when nothing is stored.
    ///
    /// # Errors
    /// Returns [`StorageError`] when the key is invalid or the medium cannot
    /// be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns [`StorageError`] when the key is invalid or the medium cannot
    /// be written.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Check that `key` is usable by every backend.
///
/// Keys are non-empty, do not start with `.` and contain only ASCII
/// alphanumerics, `_`, `-` or `.`.
///
/// # Errors
/// Returns [`StorageError::InvalidKey`] otherwise.
///
/// # Examples
/// ```
/// use platepick_store::validate_key;
///
/// assert!(validate_key("platepick_prefs").is_ok());
/// assert!(validate_key("../escape").is_err());
/// ```
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.');
    if key.is_empty() || key.starts_with('.') || !key.chars().all(allowed) {
        return Err(StorageError::InvalidKey {
            key: key.to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("platepick_prefs")]
    #[case("v1.backup")]
    #[case("A-b_9")]
    fn valid_keys(#[case] key: &str) {
        assert!(validate_key(key).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case(".hidden")]
    #[case("..")]
    #[case("nested/key")]
    #[case("back\\slash")]
    #[case("space key")]
    #[case("émoji")]
    fn invalid_keys(#[case] key: &str) {
        assert!(matches!(
            validate_key(key),
            Err(StorageError::InvalidKey { .. })
        ));
    }
}
