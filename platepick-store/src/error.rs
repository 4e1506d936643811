//! Errors raised by key-value backends and the preference adapter.

use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors returned by [`KeyValueStore`](crate::KeyValueStore)
/// implementations and by
/// [`KeyValuePreferenceStore::load`](crate::KeyValuePreferenceStore::load).
#[derive(Debug, Error)]
pub enum StorageError {
    /// The key is empty or contains characters outside the permitted set.
    #[error("invalid storage key '{key}'")]
    InvalidKey {
        /// Offending key.
        key: String,
    },
    /// The storage root could not be created or opened.
    #[error("failed to open storage root {root}: {source}")]
    Root {
        /// Directory holding stored values.
        root: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// Reading a stored value failed.
    #[error("failed to read '{key}': {source}")]
    Read {
        /// Key being read.
        key: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// Writing a value failed.
    #[error("failed to write '{key}': {source}")]
    Write {
        /// Key being written.
        key: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A stored value is not a JSON object of integer affinities.
    #[error("stored value under '{key}' is corrupt: {source}")]
    Corrupt {
        /// Key whose payload failed to decode.
        key: String,
        /// Decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// Encoding a profile failed.
    #[error("failed to encode value for '{key}': {source}")]
    Encode {
        /// Key being written.
        key: String,
        /// Encoding failure.
        #[source]
        source: serde_json::Error,
    },
}
