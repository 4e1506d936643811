//! Core domain types and algorithms for the PlatePick recommendation engine.
//!
//! A spin runs in three stages:
//!
//! 1. [`score_venues`] annotates every candidate with an effective score built
//!    from its rating, review confidence, learned tag affinities and distance.
//! 2. [`select`] fills the best-rated, hidden-gem and wildcard slots and
//!    freezes a replacement pool for each.
//! 3. [`Session`] keeps those pools for swap and ban requests and routes votes
//!    to a [`PreferenceStore`].
//!
//! Persistence lives outside this crate; anything implementing
//! [`PreferenceStore`] can back a session.

#![forbid(unsafe_code)]

mod candidates;
mod category;
mod distance;
mod preference;
mod scorer;
mod selector;
mod session;
mod slot;
mod travel;
mod venue;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use candidates::CandidateFilter;
pub use category::{Category, DINING_TYPES, matches_any};
pub use distance::{EARTH_RADIUS_KM, haversine_km};
pub use preference::{MAX_AFFINITY, MIN_AFFINITY, PreferenceProfile, PreferenceStore, Vote};
pub use scorer::{
    ADVENTURE_DISTANCE_FACTOR, MAX_REVIEW_CONFIDENCE, PREFERENCE_WEIGHT,
    PROXIMITY_DISTANCE_FACTOR, REVIEW_CONFIDENCE_FACTOR, ScoredVenue, ScoringContext,
    distance_modifier, review_confidence, score_venue, score_venues,
};
pub use selector::{
    BEST_RATED_SHORTLIST, HIDDEN_GEM_FALLBACK_SHORTLIST, HIDDEN_GEM_MAX_REVIEWS,
    HIDDEN_GEM_MIN_REVIEWS, HIDDEN_GEM_SHORTLIST, MIN_CANDIDATES, Picks, Pools, SelectError,
    Selection, WILDCARD_LIKED_BIAS, select,
};
pub use session::{Session, SessionError, Spin, SpinError, SpinId};
pub use slot::Slot;
pub use travel::{
    AVERAGE_SPEED_KMH, DEFAULT_TRAVEL_MINUTES, MAX_TRAVEL_MINUTES, METERS_PER_MINUTE,
    MIN_TRAVEL_MINUTES, TravelBudget,
};
pub use venue::{Tags, Venue, VenueId};
