//! Candidate venues supplied by the upstream search provider.
//!
//! The engine never mutates a [`Venue`]; it only annotates copies with
//! derived scores (see [`ScoredVenue`](crate::ScoredVenue)). Optional fields
//! keep their absence so display layers can tell "unrated" from "rated 0".

use std::collections::BTreeSet;
use std::fmt;

use geo::Coord;

/// Opaque, stable identity of a venue as issued by the search provider.
///
/// # Examples
/// ```
/// use platepick_core::VenueId;
///
/// let id = VenueId::from("ChIJ-abc");
/// assert_eq!(id.as_str(), "ChIJ-abc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct VenueId(String);

impl VenueId {
    /// Wrap a provider identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VenueId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for VenueId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Category tags attached to a venue, e.g. `cafe` or `pizza_restaurant`.
pub type Tags = BTreeSet<String>;

/// A dining option near the user.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`, matching
/// the `geo` convention.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use platepick_core::Venue;
///
/// let venue = Venue::new("v1", "Corner Cafe")
///     .with_rating(4.5)
///     .with_review_count(120)
///     .with_tags(["cafe", "bakery"])
///     .with_location(Coord { x: -0.1276, y: 51.5072 });
///
/// assert_eq!(venue.id.as_str(), "v1");
/// assert_eq!(venue.review_count, Some(120));
/// assert!(venue.tags.contains("bakery"));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Venue {
    /// Stable provider identity.
    pub id: VenueId,
    /// Display name.
    pub name: String,
    /// Average rating in `0.0..=5.0`, absent when the venue is unrated.
    pub rating: Option<f64>,
    /// Number of user reviews, absent when unknown.
    pub review_count: Option<u32>,
    /// Category tags as reported by the provider.
    pub tags: Tags,
    /// Position, absent when the provider could not resolve it.
    pub location: Option<Coord<f64>>,
}

impl Venue {
    /// Construct a venue with only identity and name; every optional
    /// attribute starts absent.
    pub fn new(id: impl Into<VenueId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rating: None,
            review_count: None,
            tags: Tags::new(),
            location: None,
        }
    }

    /// Set the rating while returning `self` for chaining.
    #[must_use]
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Set the review count while returning `self` for chaining.
    #[must_use]
    pub fn with_review_count(mut self, review_count: u32) -> Self {
        self.review_count = Some(review_count);
        self
    }

    /// Replace the tag set while returning `self` for chaining.
    #[must_use]
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the location while returning `self` for chaining.
    #[must_use]
    pub fn with_location(mut self, location: Coord<f64>) -> Self {
        self.location = Some(location);
        self
    }

    /// Rating used for ranking; an unrated venue counts as `0.0`.
    #[must_use]
    pub fn rating_or_zero(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    /// Review count used for ranking; an unknown count counts as `0`.
    #[must_use]
    pub fn review_count_or_zero(&self) -> u32 {
        self.review_count.unwrap_or(0)
    }
}
