//! Proptest strategies for venue pools and vote sequences.

use geo::Coord;
use proptest::prelude::*;
use platepick_core::{Venue, Vote};

/// Tags drawn from a small vocabulary so votes and venues overlap.
pub const TAG_VOCABULARY: [&str; 6] = [
    "cafe",
    "bakery",
    "pizza_restaurant",
    "sushi_restaurant",
    "vegan_restaurant",
    "bar",
];

/// Strategy for a single venue with every optional field independently absent.
///
/// The id is a placeholder; [`venue_pool_strategy`] assigns unique ones.
fn venue_strategy() -> impl Strategy<Value = Venue> {
    let rating = proptest::option::of(1.0_f64..=5.0_f64);
    let reviews = proptest::option::of(0_u32..20_000_u32);
    let location = proptest::option::of((-0.05_f64..0.05_f64, -0.05_f64..0.05_f64));
    let tags = proptest::sample::subsequence(TAG_VOCABULARY.to_vec(), 0..=3);

    (rating, reviews, location, tags).prop_map(|(rating, reviews, location, tags)| {
        let mut venue = Venue::new("placeholder", "Generated").with_tags(tags);
        venue.rating = rating;
        venue.review_count = reviews;
        venue.location = location.map(|(x, y)| Coord { x, y });
        venue
    })
}

/// Strategy for `min..=max` venues with unique identities `v0`, `v1`, ...
pub fn venue_pool_strategy(min: usize, max: usize) -> impl Strategy<Value = Vec<Venue>> {
    proptest::collection::vec(venue_strategy(), min..=max).prop_map(|venues| {
        venues
            .into_iter()
            .enumerate()
            .map(|(idx, mut venue)| {
                venue.id = format!("v{idx}").into();
                venue
            })
            .collect()
    })
}

/// Strategy for a vote cast on a subset of the tag vocabulary.
pub fn tagged_vote_strategy() -> impl Strategy<Value = (Vec<&'static str>, Vote)> {
    (
        proptest::sample::subsequence(TAG_VOCABULARY.to_vec(), 0..=3),
        prop_oneof![Just(Vote::Like), Just(Vote::Dislike)],
    )
}
