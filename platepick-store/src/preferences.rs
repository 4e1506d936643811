//! Preference persistence on top of a key-value backend.

use std::collections::BTreeMap;

use log::warn;
use platepick_core::{PreferenceProfile, PreferenceStore, Vote};

use crate::{KeyValueStore, StorageError};

/// Key under which the preference profile is stored.
pub const PREFERENCES_KEY: &str = "platepick_prefs";

/// [`PreferenceStore`] that keeps the profile as a JSON object of
/// tag → affinity under a single key.
///
/// Reads and writes fail soft. An unreadable or corrupt payload reads as an
/// empty profile and a failed write leaves the stored value as it was; both
/// are logged at `warn` level.
///
/// # Examples
/// ```
/// use platepick_core::{PreferenceStore, Vote};
/// use platepick_store::{KeyValuePreferenceStore, KeyValueStore, MemoryKeyValueStore};
///
/// let mut prefs = KeyValuePreferenceStore::new(MemoryKeyValueStore::default());
/// prefs.record_vote(&["cafe", "bakery"], Vote::Like);
///
/// assert_eq!(prefs.get_all().affinity("cafe"), 1);
/// let raw = prefs.backend().read("platepick_prefs")?;
/// assert_eq!(raw.as_deref(), Some(r#"{"bakery":1,"cafe":1}"#));
/// # Ok::<(), platepick_store::StorageError>(())
/// ```
#[derive(Debug, Clone)]
pub struct KeyValuePreferenceStore<K> {
    backend: K,
    key: String,
}

impl<K: KeyValueStore> KeyValuePreferenceStore<K> {
    /// Store preferences in `backend` under [`PREFERENCES_KEY`].
    #[must_use]
    pub fn new(backend: K) -> Self {
        Self::with_key(backend, PREFERENCES_KEY)
    }

    /// Store preferences in `backend` under a custom key.
    #[must_use]
    pub fn with_key(backend: K, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Borrow the backend.
    #[must_use]
    pub const fn backend(&self) -> &K {
        &self.backend
    }

    /// Key the profile is stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Release the backend.
    #[must_use]
    pub fn into_backend(self) -> K {
        self.backend
    }

    /// Load the stored profile, surfacing any failure.
    ///
    /// Missing values load as an empty profile. Tags are lower-cased and
    /// affinities clamped into `[-10, 10]` on the way in.
    ///
    /// # Errors
    /// Returns [`StorageError`] when the backend fails or the payload is not
    /// a JSON object of integers.
    pub fn load(&self) -> Result<PreferenceProfile, StorageError> {
        let Some(raw) = self.backend.read(&self.key)? else {
            return Ok(PreferenceProfile::new());
        };
        let stored: BTreeMap<String, i64> =
            serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
                key: self.key.clone(),
                source,
            })?;
        Ok(PreferenceProfile::from_affinities(stored))
    }

    /// Replace the stored profile.
    ///
    /// # Errors
    /// Returns [`StorageError`] when encoding or the backend write fails.
    pub fn save(&mut self, profile: &PreferenceProfile) -> Result<(), StorageError> {
        let encoded =
            serde_json::to_string(profile.as_map()).map_err(|source| StorageError::Encode {
                key: self.key.clone(),
                source,
            })?;
        self.backend.write(&self.key, &encoded)
    }
}

impl<K: KeyValueStore> PreferenceStore for KeyValuePreferenceStore<K> {
    fn get_all(&self) -> PreferenceProfile {
        self.load().unwrap_or_else(|err| {
            warn!("preferences unavailable, using an empty profile: {err}");
            PreferenceProfile::new()
        })
    }

    fn record_vote(&mut self, tags: &[&str], vote: Vote) {
        let mut profile = self.get_all();
        profile.apply_vote(tags.iter().copied(), vote);
        if let Err(err) = self.save(&profile) {
            warn!("dropping {vote} vote on {tags:?}: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryKeyValueStore;
    use rstest::rstest;

    /// Backend whose every operation fails.
    #[derive(Debug, Default)]
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Read {
                key: key.to_owned(),
                source: std::io::Error::other("disk on fire"),
            })
        }

        fn write(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write {
                key: key.to_owned(),
                source: std::io::Error::other("disk on fire"),
            })
        }
    }

    fn seeded(raw: &str) -> KeyValuePreferenceStore<MemoryKeyValueStore> {
        KeyValuePreferenceStore::new(MemoryKeyValueStore::with_entries([(PREFERENCES_KEY, raw)]))
    }

    #[rstest]
    fn missing_value_loads_empty() {
        let prefs = KeyValuePreferenceStore::new(MemoryKeyValueStore::default());
        assert!(prefs.load().expect("load").is_empty());
    }

    #[rstest]
    fn stored_values_are_clamped_and_lower_cased() {
        let prefs = seeded(r#"{"Cafe": 42, "pizza_restaurant": -99, "bakery": 3}"#);
        let profile = prefs.get_all();
        assert_eq!(profile.affinity("cafe"), 10);
        assert_eq!(profile.affinity("pizza_restaurant"), -10);
        assert_eq!(profile.affinity("bakery"), 3);
    }

    #[rstest]
    #[case("not json")]
    #[case("[1, 2, 3]")]
    #[case(r#"{"cafe": "lots"}"#)]
    #[case(r#"{"cafe": 1.5}"#)]
    fn corrupt_payload_reads_as_empty(#[case] raw: &str) {
        let prefs = seeded(raw);
        assert!(matches!(prefs.load(), Err(StorageError::Corrupt { .. })));
        assert!(prefs.get_all().is_empty());
    }

    #[rstest]
    fn vote_over_corrupt_payload_starts_fresh() {
        let mut prefs = seeded("garbage");
        prefs.record_vote(&["cafe"], Vote::Dislike);
        assert_eq!(prefs.get_all().affinity("cafe"), -1);
    }

    #[rstest]
    fn broken_backend_never_fails_callers() {
        let mut prefs = KeyValuePreferenceStore::new(BrokenStore);
        prefs.record_vote(&["cafe"], Vote::Like);
        assert!(prefs.get_all().is_empty());
        assert_eq!(prefs.score_for(&["cafe"]), 0);
        assert!(prefs.load().is_err());
    }

    #[rstest]
    fn invalid_custom_key_degrades_to_empty() {
        let mut prefs = KeyValuePreferenceStore::with_key(MemoryKeyValueStore::default(), "a/b");
        prefs.record_vote(&["cafe"], Vote::Like);
        assert!(prefs.get_all().is_empty());
    }

    #[rstest]
    fn votes_accumulate_across_instances() {
        let mut first = KeyValuePreferenceStore::new(MemoryKeyValueStore::default());
        first.record_vote(&["cafe"], Vote::Like);
        first.record_vote(&["cafe"], Vote::Like);
        let backend = first.into_backend();

        let second = KeyValuePreferenceStore::new(backend);
        assert_eq!(second.get_all().affinity("cafe"), 2);
    }
}
