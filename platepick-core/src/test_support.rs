//! Test-only, in-memory `PreferenceStore` and venue builders used by unit and
//! behaviour tests.

use geo::Coord;

use crate::{PreferenceProfile, PreferenceStore, Venue, Vote};

/// In-memory `PreferenceStore` implementation used in tests.
///
/// Every vote is applied to the wrapped profile; nothing is persisted.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct MemoryPreferenceStore {
    profile: PreferenceProfile,
    votes_recorded: usize,
}

impl MemoryPreferenceStore {
    /// Create a store seeded with `profile`.
    #[must_use]
    pub const fn with_profile(profile: PreferenceProfile) -> Self {
        Self {
            profile,
            votes_recorded: 0,
        }
    }

    /// Number of votes recorded since construction.
    #[must_use]
    pub const fn votes_recorded(&self) -> usize {
        self.votes_recorded
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get_all(&self) -> PreferenceProfile {
        self.profile.clone()
    }

    fn record_vote(&mut self, tags: &[&str], vote: Vote) {
        self.profile.apply_vote(tags.iter().copied(), vote);
        self.votes_recorded = self.votes_recorded.saturating_add(1);
    }
}

/// A rated venue with a review count and no tags or location.
#[must_use]
pub fn rated_venue(id: &str, rating: f64, review_count: u32) -> Venue {
    Venue::new(id, id.to_uppercase())
        .with_rating(rating)
        .with_review_count(review_count)
}

/// A venue placed at `lon`/`lat` with the given rating.
#[must_use]
pub fn located_venue(id: &str, rating: f64, lon: f64, lat: f64) -> Venue {
    Venue::new(id, id.to_uppercase())
        .with_rating(rating)
        .with_location(Coord { x: lon, y: lat })
}

/// The three-venue pool used throughout the selection scenarios:
/// `A` (4.8, 500 reviews), `B` (4.6, 40) and `C` (3.9, 5000).
#[must_use]
pub fn trio() -> Vec<Venue> {
    vec![
        rated_venue("A", 4.8, 500),
        rated_venue("B", 4.6, 40),
        rated_venue("C", 3.9, 5000),
    ]
}

/// `count` unremarkable venues named `v0`, `v1`, ... with descending ratings.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "ratings step down by a tenth per venue"
)]
pub fn numbered_venues(count: u32) -> Vec<Venue> {
    (0..count)
        .map(|i| {
            let rating = (5.0 - f64::from(i) * 0.1).max(1.0);
            rated_venue(&format!("v{i}"), rating, 10 + i)
        })
        .collect()
}
