//! Learned taste: per-tag affinities and the store that persists them.
//!
//! Affinities are signed integers clamped to `[-10, 10]`. Votes nudge every
//! tag of a venue by one step; the scorer later sums the affinities of a
//! venue's tags into its preference score.
//!
//! Persistence is behind the [`PreferenceStore`] trait so the session can run
//! against an in-memory fake in tests and a key-value backend in production.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Lowest affinity a tag can hold.
pub const MIN_AFFINITY: i32 = -10;
/// Highest affinity a tag can hold.
pub const MAX_AFFINITY: i32 = 10;

/// A user's verdict on a venue.
///
/// # Examples
/// ```
/// use platepick_core::Vote;
///
/// assert_eq!(Vote::Like.weight(), 1);
/// assert_eq!(Vote::Dislike.weight(), -1);
/// assert_eq!("dislike".parse::<Vote>(), Ok(Vote::Dislike));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Vote {
    /// Thumbs up, `+1`.
    Like,
    /// Thumbs down, `-1`.
    Dislike,
}

impl Vote {
    /// Signed weight added to each affected affinity.
    #[must_use]
    pub const fn weight(self) -> i32 {
        match self {
            Self::Like => 1,
            Self::Dislike => -1,
        }
    }

    /// Return the vote as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Vote {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "like" | "up" | "+1" => Ok(Self::Like),
            "dislike" | "down" | "-1" => Ok(Self::Dislike),
            _ => Err(format!("unknown vote '{s}'")),
        }
    }
}

/// Snapshot of every learned affinity, keyed by lower-cased tag.
///
/// # Examples
/// ```
/// use platepick_core::{PreferenceProfile, Vote};
///
/// let mut profile = PreferenceProfile::new();
/// profile.apply_vote(["Cafe", "bakery"], Vote::Like);
/// profile.apply_vote(["bakery"], Vote::Like);
///
/// assert_eq!(profile.affinity("cafe"), 1);
/// assert_eq!(profile.score_for(["CAFE", "bakery", "pizza_restaurant"]), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreferenceProfile {
    affinities: BTreeMap<String, i32>,
}

impl PreferenceProfile {
    /// Construct an empty profile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a profile from raw stored values.
    ///
    /// Keys are lower-cased and values clamped so a hand-edited or legacy
    /// payload still yields a profile within bounds. When two keys collapse
    /// to the same lower-cased tag the later one in key order wins.
    pub fn from_affinities<I, K>(affinities: I) -> Self
    where
        I: IntoIterator<Item = (K, i64)>,
        K: AsRef<str>,
    {
        let affinities = affinities
            .into_iter()
            .map(|(tag, value)| (normalise_tag(tag.as_ref()), clamp_affinity(value)))
            .collect();
        Self { affinities }
    }

    /// Return the affinity for a tag, `0` when nothing has been learned.
    #[must_use]
    pub fn affinity(&self, tag: &str) -> i32 {
        self.affinities
            .get(&normalise_tag(tag))
            .copied()
            .unwrap_or(0)
    }

    /// Sum the affinities of the given tags.
    ///
    /// Tags are case-normalised and de-duplicated first, so `["Cafe", "cafe"]`
    /// counts once. An empty tag set scores `0`.
    pub fn score_for<I, T>(&self, tags: I) -> i32
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        normalise_tags(tags)
            .iter()
            .filter_map(|tag| self.affinities.get(tag))
            .sum()
    }

    /// Add `vote` to each tag's affinity and clamp the result.
    pub fn apply_vote<I, T>(&mut self, tags: I, vote: Vote)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        for tag in normalise_tags(tags) {
            let entry = self.affinities.entry(tag).or_insert(0);
            *entry = entry
                .saturating_add(vote.weight())
                .clamp(MIN_AFFINITY, MAX_AFFINITY);
        }
    }

    /// Iterate over `(tag, affinity)` pairs in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.affinities
            .iter()
            .map(|(tag, value)| (tag.as_str(), *value))
    }

    /// Number of tags with a stored affinity.
    #[must_use]
    pub fn len(&self) -> usize {
        self.affinities.len()
    }

    /// Report whether no affinity has been learned yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.affinities.is_empty()
    }

    /// Borrow the underlying map.
    #[must_use]
    pub const fn as_map(&self) -> &BTreeMap<String, i32> {
        &self.affinities
    }
}

fn normalise_tag(tag: &str) -> String {
    tag.to_lowercase()
}

fn normalise_tags<I, T>(tags: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    tags.into_iter()
        .map(|tag| normalise_tag(tag.as_ref()))
        .collect()
}

fn clamp_affinity(value: i64) -> i32 {
    let clamped = value.clamp(i64::from(MIN_AFFINITY), i64::from(MAX_AFFINITY));
    i32::try_from(clamped).unwrap_or(0)
}

/// Persistent mapping from category tag to affinity.
///
/// Implementations must fail soft: a read that cannot be completed returns an
/// empty profile and a write that cannot be completed is dropped, both after
/// logging. Selection never fails because persistence did.
///
/// # Examples
///
/// ```rust
/// use platepick_core::{PreferenceProfile, PreferenceStore, Vote};
///
/// #[derive(Default)]
/// struct InMemory(PreferenceProfile);
///
/// impl PreferenceStore for InMemory {
///     fn get_all(&self) -> PreferenceProfile {
///         self.0.clone()
///     }
///
///     fn record_vote(&mut self, tags: &[&str], vote: Vote) {
///         self.0.apply_vote(tags.iter().copied(), vote);
///     }
/// }
///
/// let mut store = InMemory::default();
/// store.record_vote(&["cafe"], Vote::Like);
/// assert_eq!(store.score_for(&["cafe", "bakery"]), 1);
/// ```
pub trait PreferenceStore {
    /// Return the current persisted state, or an empty profile when nothing
    /// is stored or the payload is unreadable.
    fn get_all(&self) -> PreferenceProfile;

    /// Add `vote` to every tag's affinity, clamped to `[-10, 10]`, and
    /// persist the result.
    fn record_vote(&mut self, tags: &[&str], vote: Vote);

    /// Sum the stored affinities of `tags`.
    fn score_for(&self, tags: &[&str]) -> i32 {
        self.get_all().score_for(tags.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn fifteen_likes_clamp_at_ten() {
        let mut profile = PreferenceProfile::new();
        for _ in 0..15 {
            profile.apply_vote(["cafe"], Vote::Like);
        }
        assert_eq!(profile.affinity("cafe"), MAX_AFFINITY);
    }

    #[rstest]
    fn dislikes_clamp_at_minus_ten() {
        let mut profile = PreferenceProfile::new();
        for _ in 0..12 {
            profile.apply_vote(["pizza_restaurant"], Vote::Dislike);
        }
        assert_eq!(profile.affinity("pizza_restaurant"), MIN_AFFINITY);
        profile.apply_vote(["pizza_restaurant"], Vote::Like);
        assert_eq!(profile.affinity("pizza_restaurant"), -9);
    }

    #[rstest]
    fn votes_are_case_normalised() {
        let mut profile = PreferenceProfile::new();
        profile.apply_vote(["Cafe"], Vote::Like);
        profile.apply_vote(["CAFE"], Vote::Like);
        assert_eq!(profile.affinity("cafe"), 2);
        assert_eq!(profile.len(), 1);
    }

    #[rstest]
    fn empty_tag_set_scores_zero() {
        let mut profile = PreferenceProfile::new();
        profile.apply_vote(["cafe"], Vote::Like);
        assert_eq!(profile.score_for(std::iter::empty::<&str>()), 0);
    }

    #[rstest]
    #[case(&["cafe", "bakery"], 3)]
    #[case(&["bakery", "cafe"], 3)]
    #[case(&["cafe", "cafe"], 1)]
    #[case(&["unknown"], 0)]
    fn score_sums_known_tags(#[case] tags: &[&str], #[case] expected: i32) {
        let profile = PreferenceProfile::from_affinities([("cafe", 1_i64), ("bakery", 2)]);
        assert_eq!(profile.score_for(tags.iter().copied()), expected);
    }

    #[rstest]
    #[case(25, MAX_AFFINITY)]
    #[case(-99, MIN_AFFINITY)]
    #[case(i64::MAX, MAX_AFFINITY)]
    #[case(4, 4)]
    fn loading_clamps_out_of_range_values(#[case] raw: i64, #[case] expected: i32) {
        let profile = PreferenceProfile::from_affinities([("Sushi_Restaurant", raw)]);
        assert_eq!(profile.affinity("sushi_restaurant"), expected);
    }

    #[rstest]
    fn vote_round_trips_through_display() {
        for vote in [Vote::Like, Vote::Dislike] {
            assert_eq!(vote.to_string().parse::<Vote>(), Ok(vote));
        }
    }

    #[rstest]
    fn parsing_rejects_unknown_vote() {
        let err = "meh".parse::<Vote>().unwrap_err();
        assert!(err.contains("unknown vote"));
    }
}
