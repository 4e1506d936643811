//! Narrow the raw venue pool into selector input.

use std::collections::HashSet;

use geo::Coord;
use log::debug;

use crate::{Category, TravelBudget, Venue, VenueId, category::matches_any, haversine_km};

/// Filters applied to raw candidates before a spin.
///
/// Steps run in order: ban list, category selection, travel radius, then
/// duplicate identities (the first occurrence wins). Surviving venues keep
/// their input order. Venues without a coordinate are never dropped by the
/// radius check.
///
/// # Examples
/// ```
/// use platepick_core::{CandidateFilter, Category, Venue};
///
/// let venues = vec![
///     Venue::new("p", "Pizzeria").with_tags(["pizza_restaurant"]),
///     Venue::new("c", "Cafe").with_tags(["cafe"]),
///     Venue::new("p", "Pizzeria again").with_tags(["pizza_restaurant"]),
/// ];
/// let filter = CandidateFilter::new().with_categories([Category::Pizza]);
/// let kept = filter.apply(&venues);
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].name, "Pizzeria");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateFilter {
    banned: HashSet<VenueId>,
    categories: Vec<Category>,
    origin: Option<Coord<f64>>,
    budget: Option<TravelBudget>,
}

impl CandidateFilter {
    /// A filter that only removes duplicates.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude these venue identities.
    #[must_use]
    pub fn with_banned<I>(mut self, banned: I) -> Self
    where
        I: IntoIterator<Item = VenueId>,
    {
        self.banned.extend(banned);
        self
    }

    /// Keep only venues matching any of these categories.
    #[must_use]
    pub fn with_categories<I>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = Category>,
    {
        self.categories.extend(categories);
        self
    }

    /// Keep only venues reachable from `origin` within `budget`.
    #[must_use]
    pub const fn with_travel_budget(mut self, origin: Coord<f64>, budget: TravelBudget) -> Self {
        self.origin = Some(origin);
        self.budget = Some(budget);
        self
    }

    /// Run every filter step over `venues`.
    #[must_use]
    pub fn apply(&self, venues: &[Venue]) -> Vec<Venue> {
        let mut seen = HashSet::new();
        let kept: Vec<Venue> = venues
            .iter()
            .filter(|venue| !self.banned.contains(&venue.id))
            .filter(|venue| matches_any(&self.categories, venue))
            .filter(|venue| self.within_radius(venue))
            .filter(|venue| seen.insert(venue.id.clone()))
            .cloned()
            .collect();
        debug!("kept {} of {} candidates", kept.len(), venues.len());
        kept
    }

    fn within_radius(&self, venue: &Venue) -> bool {
        match (self.origin, self.budget, venue.location) {
            (Some(origin), Some(budget), Some(location)) => {
                haversine_km(origin, location) <= budget.radius_km()
            }
            _ => true,
        }
    }
}
