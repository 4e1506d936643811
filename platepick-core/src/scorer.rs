//! Score venues for a user.
//!
//! The effective score blends four signals:
//!
//! ```text
//! effective = rating + review_confidence + 0.5 * preference + distance_modifier
//! ```
//!
//! - `rating` anchors the score (absent counts as `0`).
//! - `review_confidence = min(log10(max(reviews, 1)) * 0.2, 1.0)` keeps a
//!   single five-star review from outranking an established favourite.
//! - `preference` is the sum of learned tag affinities.
//! - `distance_modifier` penalises distance (`-0.1` per km) in standard mode
//!   and rewards it (`+0.15` per km) in adventure mode; it is `0` whenever
//!   either coordinate is missing.
//!
//! Scoring is total: any combination of absent rating, review count and
//! location produces a finite score.

use geo::Coord;

use crate::{PreferenceProfile, Venue, haversine_km};

/// Multiplier applied to `log10(review_count)`.
pub const REVIEW_CONFIDENCE_FACTOR: f64 = 0.2;
/// Upper bound of the review confidence term.
pub const MAX_REVIEW_CONFIDENCE: f64 = 1.0;
/// Effective-rating shift per unit of affinity.
pub const PREFERENCE_WEIGHT: f64 = 0.5;
/// Score added per kilometre in adventure mode.
pub const ADVENTURE_DISTANCE_FACTOR: f64 = 0.15;
/// Score removed per kilometre in standard mode.
pub const PROXIMITY_DISTANCE_FACTOR: f64 = 0.1;

/// User context shared by every venue scored in one spin.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use platepick_core::ScoringContext;
///
/// let context = ScoringContext::new()
///     .with_user_location(Coord { x: 2.35, y: 48.85 })
///     .with_adventure_mode(true);
/// assert!(context.adventure_mode);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoringContext {
    /// Where the user is, if known.
    pub user_location: Option<Coord<f64>>,
    /// Reward distance instead of penalising it.
    pub adventure_mode: bool,
}

impl ScoringContext {
    /// Context with no location in standard mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the user's location while returning `self` for chaining.
    #[must_use]
    pub const fn with_user_location(mut self, location: Coord<f64>) -> Self {
        self.user_location = Some(location);
        self
    }

    /// Toggle adventure mode while returning `self` for chaining.
    #[must_use]
    pub const fn with_adventure_mode(mut self, adventure_mode: bool) -> Self {
        self.adventure_mode = adventure_mode;
        self
    }
}

/// A venue annotated with the scores derived for the current spin.
///
/// Derived fields are recomputed on every spin and never persisted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScoredVenue {
    /// The candidate itself.
    pub venue: Venue,
    /// Sum of the affinities of the venue's tags.
    pub preference_score: i32,
    /// Review-count confidence in `0.0..=1.0`.
    pub review_confidence: f64,
    /// Composite ranking value.
    pub effective_score: f64,
}

/// Score one venue.
///
/// # Examples
/// ```
/// use platepick_core::{PreferenceProfile, ScoringContext, Venue, score_venue};
///
/// let venue = Venue::new("a", "Alpha").with_rating(4.8).with_review_count(500);
/// let scored = score_venue(&venue, &PreferenceProfile::new(), &ScoringContext::new());
///
/// // 4.8 + log10(500) * 0.2
/// assert!((scored.effective_score - 5.3398).abs() < 1e-3);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the effective score is a weighted floating-point sum"
)]
pub fn score_venue(
    venue: &Venue,
    profile: &PreferenceProfile,
    context: &ScoringContext,
) -> ScoredVenue {
    let preference_score = profile.score_for(&venue.tags);
    let review_confidence = review_confidence(venue.review_count);
    let distance = distance_modifier(venue.location, context);
    let effective_score = venue.rating_or_zero()
        + review_confidence
        + f64::from(preference_score) * PREFERENCE_WEIGHT
        + distance;

    ScoredVenue {
        venue: venue.clone(),
        preference_score,
        review_confidence,
        effective_score,
    }
}

/// Score every venue, preserving input order.
#[must_use]
pub fn score_venues(
    venues: &[Venue],
    profile: &PreferenceProfile,
    context: &ScoringContext,
) -> Vec<ScoredVenue> {
    venues
        .iter()
        .map(|venue| score_venue(venue, profile, context))
        .collect()
}

/// Confidence earned from the review count.
///
/// Saturates at `1.0` from 100 000 reviews; zero or unknown counts yield `0.0`.
///
/// # Examples
/// ```
/// use platepick_core::review_confidence;
///
/// assert_eq!(review_confidence(None), 0.0);
/// assert_eq!(review_confidence(Some(1)), 0.0);
/// assert!((review_confidence(Some(100)) - 0.4).abs() < 1e-12);
/// assert_eq!(review_confidence(Some(1_000_000)), 1.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "confidence scales a logarithm"
)]
pub fn review_confidence(review_count: Option<u32>) -> f64 {
    let count = review_count.unwrap_or(0).max(1);
    (f64::from(count).log10() * REVIEW_CONFIDENCE_FACTOR).min(MAX_REVIEW_CONFIDENCE)
}

/// Distance contribution for a venue at `venue_location`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use platepick_core::{ScoringContext, distance_modifier};
///
/// let here = Coord { x: 0.0, y: 0.0 };
/// let standard = ScoringContext::new().with_user_location(here);
/// assert_eq!(distance_modifier(None, &standard), 0.0);
/// assert!(distance_modifier(Some(Coord { x: 0.0, y: 0.01 }), &standard) < 0.0);
///
/// let adventure = standard.with_adventure_mode(true);
/// assert!(distance_modifier(Some(Coord { x: 0.0, y: 0.01 }), &adventure) > 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "distance modifiers scale kilometres"
)]
pub fn distance_modifier(venue_location: Option<Coord<f64>>, context: &ScoringContext) -> f64 {
    let (Some(user), Some(venue)) = (context.user_location, venue_location) else {
        return 0.0;
    };
    let distance_km = haversine_km(user, venue);
    if context.adventure_mode {
        distance_km * ADVENTURE_DISTANCE_FACTOR
    } else {
        -(distance_km * PROXIMITY_DISTANCE_FACTOR)
    }
}
