//! Turn a scored candidate list into three picks and their backing pools.
//!
//! Each slot has its own policy and each winner is removed before the next
//! slot is filled, so picks are pairwise distinct by identity:
//!
//! 1. **Best Rated**: rank everything by effective score (ties keep input
//!    order) and draw uniformly from the top three.
//! 2. **Hidden Gem**: keep venues with more than 5 and fewer than 150 reviews,
//!    rank them by raw rating and draw from the top five. Review confidence is
//!    left out on purpose since a low review count is the point of the slot.
//!    When nothing qualifies, draw from the top three of the best-rated ranking
//!    instead; the reported pool stays empty.
//! 3. **Wildcard**: whatever is left. Half of the time the draw is restricted
//!    to venues with a positive preference score, when there are any.
//!
//! Randomness comes from the caller so a seeded generator makes a spin fully
//! reproducible.

use std::collections::HashSet;

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::{ScoredVenue, Slot, VenueId};

/// Fewest candidates a spin needs.
pub const MIN_CANDIDATES: usize = 3;
/// Size of the best-rated shortlist.
pub const BEST_RATED_SHORTLIST: usize = 3;
/// Size of the hidden-gem shortlist.
pub const HIDDEN_GEM_SHORTLIST: usize = 5;
/// Size of the best-rated shortlist used when no hidden gem qualifies.
pub const HIDDEN_GEM_FALLBACK_SHORTLIST: usize = 3;
/// Hidden gems need strictly more reviews than this.
pub const HIDDEN_GEM_MIN_REVIEWS: u32 = 5;
/// Hidden gems need strictly fewer reviews than this.
pub const HIDDEN_GEM_MAX_REVIEWS: u32 = 150;
/// Probability that the wildcard draw favours liked venues.
pub const WILDCARD_LIKED_BIAS: f64 = 0.5;

/// Errors returned by [`select`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    /// Too few candidates to fill the slots.
    #[error("need at least {required} candidates, found {available}")]
    InsufficientCandidates {
        /// Candidates supplied.
        available: usize,
        /// Candidates required.
        required: usize,
    },
}

/// The venue currently shown in each slot.
///
/// A slot can be empty after a spin (for instance when every candidate was
/// already picked) or after a ban drained its pool.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Picks {
    /// Best Rated pick.
    pub best_rated: Option<ScoredVenue>,
    /// Hidden Gem pick.
    pub hidden_gem: Option<ScoredVenue>,
    /// Wildcard pick.
    pub wildcard: Option<ScoredVenue>,
}

impl Picks {
    /// Borrow the pick for a slot.
    #[must_use]
    pub const fn get(&self, slot: Slot) -> Option<&ScoredVenue> {
        match slot {
            Slot::BestRated => self.best_rated.as_ref(),
            Slot::HiddenGem => self.hidden_gem.as_ref(),
            Slot::Wildcard => self.wildcard.as_ref(),
        }
    }

    /// Replace the pick for a slot.
    pub fn set(&mut self, slot: Slot, pick: Option<ScoredVenue>) {
        let target = match slot {
            Slot::BestRated => &mut self.best_rated,
            Slot::HiddenGem => &mut self.hidden_gem,
            Slot::Wildcard => &mut self.wildcard,
        };
        *target = pick;
    }

    /// Iterate over every slot with its pick, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, Option<&ScoredVenue>)> {
        Slot::ALL.into_iter().map(|slot| (slot, self.get(slot)))
    }

    /// Identities of every present pick.
    #[must_use]
    pub fn ids(&self) -> HashSet<&VenueId> {
        self.iter()
            .filter_map(|(_, pick)| pick.map(|scored| &scored.venue.id))
            .collect()
    }
}

/// Every candidate that was eligible for each slot, in slot order.
///
/// Pools are frozen once produced; swaps and bans only change [`Picks`].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Pools {
    /// All candidates by descending effective score.
    pub best_rated: Vec<ScoredVenue>,
    /// Review-window candidates by descending rating, before any fallback.
    pub hidden_gem: Vec<ScoredVenue>,
    /// Candidates left after the first two picks, in input order.
    pub wildcard: Vec<ScoredVenue>,
}

impl Pools {
    /// Borrow the pool backing a slot.
    #[must_use]
    pub fn get(&self, slot: Slot) -> &[ScoredVenue] {
        match slot {
            Slot::BestRated => &self.best_rated,
            Slot::HiddenGem => &self.hidden_gem,
            Slot::Wildcard => &self.wildcard,
        }
    }
}

/// Picks plus the pools they were drawn from.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Selection {
    /// Current picks.
    pub picks: Picks,
    /// Replacement material for swaps and bans.
    pub pools: Pools,
}

/// Select picks and pools from scored candidates.
///
/// # Errors
/// Returns [`SelectError::InsufficientCandidates`] when fewer than
/// [`MIN_CANDIDATES`] candidates are supplied.
///
/// # Examples
/// ```
/// use platepick_core::{PreferenceProfile, ScoringContext, Venue, score_venues, select};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let venues = vec![
///     Venue::new("a", "Alpha").with_rating(4.8).with_review_count(500),
///     Venue::new("b", "Bravo").with_rating(4.6).with_review_count(40),
///     Venue::new("c", "Charlie").with_rating(3.9).with_review_count(5000),
/// ];
/// let scored = score_venues(&venues, &PreferenceProfile::new(), &ScoringContext::new());
/// let mut rng = StdRng::seed_from_u64(7);
/// let selection = select(scored, &mut rng)?;
///
/// assert!(selection.picks.best_rated.is_some());
/// assert_eq!(selection.pools.best_rated.len(), 3);
/// # Ok::<(), platepick_core::SelectError>(())
/// ```
pub fn select<R>(scored: Vec<ScoredVenue>, rng: &mut R) -> Result<Selection, SelectError>
where
    R: Rng + ?Sized,
{
    if scored.len() < MIN_CANDIDATES {
        return Err(SelectError::InsufficientCandidates {
            available: scored.len(),
            required: MIN_CANDIDATES,
        });
    }

    let best_rated_pool = rank_by_effective_score(&scored);
    let best_rated = choose_from_top(best_rated_pool.iter(), BEST_RATED_SHORTLIST, rng).cloned();

    let mut taken: HashSet<VenueId> = best_rated
        .iter()
        .map(|pick| pick.venue.id.clone())
        .collect();

    let hidden_gem_pool = rank_hidden_gems(&scored, &taken);
    let hidden_gem = if hidden_gem_pool.is_empty() {
        debug!("no hidden gem in the review window; falling back to the best-rated ranking");
        let remaining = best_rated_pool
            .iter()
            .filter(|candidate| !taken.contains(&candidate.venue.id));
        choose_from_top(remaining, HIDDEN_GEM_FALLBACK_SHORTLIST, rng).cloned()
    } else {
        choose_from_top(hidden_gem_pool.iter(), HIDDEN_GEM_SHORTLIST, rng).cloned()
    };
    taken.extend(hidden_gem.iter().map(|pick| pick.venue.id.clone()));

    let wildcard_pool: Vec<ScoredVenue> = scored
        .into_iter()
        .filter(|candidate| !taken.contains(&candidate.venue.id))
        .collect();
    let wildcard = choose_wildcard(&wildcard_pool, rng).cloned();

    Ok(Selection {
        picks: Picks {
            best_rated,
            hidden_gem,
            wildcard,
        },
        pools: Pools {
            best_rated: best_rated_pool,
            hidden_gem: hidden_gem_pool,
            wildcard: wildcard_pool,
        },
    })
}

fn rank_by_effective_score(scored: &[ScoredVenue]) -> Vec<ScoredVenue> {
    let mut ranked = scored.to_vec();
    // `sort_by` is stable, so equal scores keep their input order.
    ranked.sort_by(|a, b| b.effective_score.total_cmp(&a.effective_score));
    ranked
}

fn rank_hidden_gems(scored: &[ScoredVenue], taken: &HashSet<VenueId>) -> Vec<ScoredVenue> {
    let mut gems: Vec<ScoredVenue> = scored
        .iter()
        .filter(|candidate| !taken.contains(&candidate.venue.id))
        .filter(|candidate| is_in_review_window(candidate))
        .cloned()
        .collect();
    gems.sort_by(|a, b| {
        b.venue
            .rating_or_zero()
            .total_cmp(&a.venue.rating_or_zero())
    });
    gems
}

fn is_in_review_window(candidate: &ScoredVenue) -> bool {
    let reviews = candidate.venue.review_count_or_zero();
    reviews > HIDDEN_GEM_MIN_REVIEWS && reviews < HIDDEN_GEM_MAX_REVIEWS
}

fn choose_from_top<'a, I, R>(ranked: I, shortlist: usize, rng: &mut R) -> Option<&'a ScoredVenue>
where
    I: Iterator<Item = &'a ScoredVenue>,
    R: Rng + ?Sized,
{
    let top: Vec<&ScoredVenue> = ranked.take(shortlist).collect();
    top.choose(rng).copied()
}

fn choose_wildcard<'a, R>(pool: &'a [ScoredVenue], rng: &mut R) -> Option<&'a ScoredVenue>
where
    R: Rng + ?Sized,
{
    if pool.is_empty() {
        return None;
    }
    let favour_liked = rng.gen_bool(WILDCARD_LIKED_BIAS);
    let liked: Vec<&ScoredVenue> = pool
        .iter()
        .filter(|candidate| candidate.preference_score > 0)
        .collect();
    if favour_liked && !liked.is_empty() {
        liked.choose(rng).copied()
    } else {
        pool.choose(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PreferenceProfile, ScoringContext, Venue, Vote, score_venues};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::{fixture, rstest};

    #[fixture]
    fn trio() -> Vec<Venue> {
        vec![
            Venue::new("a", "Alpha").with_rating(4.8).with_review_count(500),
            Venue::new("b", "Bravo").with_rating(4.6).with_review_count(40),
            Venue::new("c", "Charlie").with_rating(3.9).with_review_count(5000),
        ]
    }

    fn scored(venues: &[Venue]) -> Vec<ScoredVenue> {
        score_venues(venues, &PreferenceProfile::new(), &ScoringContext::new())
    }

    fn ids(pool: &[ScoredVenue]) -> Vec<&str> {
        pool.iter().map(|s| s.venue.id.as_str()).collect()
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(2)]
    fn fewer_than_three_candidates_is_insufficient(trio: Vec<Venue>, #[case] count: usize) {
        let candidates: Vec<Venue> = trio.into_iter().take(count).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = select(scored(&candidates), &mut rng).unwrap_err();
        assert_eq!(
            err,
            SelectError::InsufficientCandidates {
                available: count,
                required: MIN_CANDIDATES,
            }
        );
    }

    #[rstest]
    fn best_rated_pool_is_sorted_by_effective_score(trio: Vec<Venue>) {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let selection = select(scored(&trio), &mut rng).unwrap();
        // a: 4.8 + 0.54, b: 4.6 + 0.32, c: 3.9 + 0.74
        assert_eq!(ids(&selection.pools.best_rated), ["a", "b", "c"]);
    }

    #[rstest]
    fn hidden_gem_pool_only_holds_review_window_venues(trio: Vec<Venue>) {
        for seed in 0..32 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let selection = select(scored(&trio), &mut rng).unwrap();
            let best = selection.picks.best_rated.as_ref().unwrap();
            if best.venue.id.as_str() == "b" {
                assert!(selection.pools.hidden_gem.is_empty());
                // Fallback still fills the slot from the remaining ranking.
                let gem = selection.picks.hidden_gem.as_ref().unwrap();
                assert_ne!(gem.venue.id.as_str(), "b");
            } else {
                assert_eq!(ids(&selection.pools.hidden_gem), ["b"]);
                let gem = selection.picks.hidden_gem.as_ref().unwrap();
                assert_eq!(gem.venue.id.as_str(), "b");
            }
        }
    }

    #[rstest]
    #[case(5, false)]
    #[case(6, true)]
    #[case(149, true)]
    #[case(150, false)]
    fn review_window_is_exclusive(#[case] reviews: u32, #[case] eligible: bool) {
        let venue = Venue::new("v", "V").with_rating(4.0).with_review_count(reviews);
        let scored = scored(&[venue]);
        let candidate = scored.first().unwrap();
        assert_eq!(is_in_review_window(candidate), eligible);
    }

    #[rstest]
    fn hidden_gems_rank_by_raw_rating() {
        let venues = vec![
            Venue::new("big", "Big").with_rating(4.9).with_review_count(90_000),
            Venue::new("g1", "Gem one").with_rating(4.1).with_review_count(100),
            Venue::new("g2", "Gem two").with_rating(4.7).with_review_count(6),
            Venue::new("g3", "Gem three").with_rating(4.4).with_review_count(149),
        ];
        let profile = PreferenceProfile::new();
        let scored = score_venues(&venues, &profile, &ScoringContext::new());
        let gems = rank_hidden_gems(&scored, &HashSet::new());
        assert_eq!(ids(&gems), ["g2", "g3", "g1"]);
    }

    #[rstest]
    fn ties_keep_input_order() {
        let venues = vec![
            Venue::new("x", "X").with_rating(4.0),
            Venue::new("y", "Y").with_rating(4.0),
            Venue::new("z", "Z").with_rating(4.0),
        ];
        let ranked = rank_by_effective_score(&scored(&venues));
        assert_eq!(ids(&ranked), ["x", "y", "z"]);
    }

    #[rstest]
    fn picks_are_pairwise_distinct() {
        let venues: Vec<Venue> = (0..10)
            .map(|i| {
                Venue::new(format!("v{i}"), format!("Venue {i}"))
                    .with_rating(4.0)
                    .with_review_count(20 * (i + 1))
            })
            .collect();
        for seed in 0..64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let selection = select(scored(&venues), &mut rng).unwrap();
            assert_eq!(selection.picks.ids().len(), 3);
        }
    }

    #[rstest]
    fn wildcard_pool_excludes_both_prior_picks(trio: Vec<Venue>) {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let selection = select(scored(&trio), &mut rng).unwrap();
        let picked: Vec<&VenueId> = [&selection.picks.best_rated, &selection.picks.hidden_gem]
            .into_iter()
            .flatten()
            .map(|s| &s.venue.id)
            .collect();
        assert_eq!(selection.pools.wildcard.len(), 1);
        for candidate in &selection.pools.wildcard {
            assert!(!picked.contains(&&candidate.venue.id));
        }
    }

    #[rstest]
    fn wildcard_favours_liked_venues_about_half_the_time() {
        let mut profile = PreferenceProfile::new();
        profile.apply_vote(["sushi_restaurant"], Vote::Like);
        // Four high scorers soak up best rated and the hidden-gem fallback.
        let mut venues: Vec<Venue> = (1..=4)
            .map(|i| {
                Venue::new(format!("top{i}"), "Top")
                    .with_rating(5.0)
                    .with_review_count(9000)
            })
            .collect();
        venues.extend((0..9).map(|i| {
            Venue::new(format!("plain{i}"), "Plain")
                .with_rating(1.0)
                .with_review_count(1000)
        }));
        venues.push(
            Venue::new("liked", "Liked")
                .with_rating(1.0)
                .with_review_count(1000)
                .with_tags(["sushi_restaurant"]),
        );

        let runs = 400;
        let mut liked_hits = 0;
        for seed in 0..runs {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let scored = score_venues(&venues, &profile, &ScoringContext::new());
            let selection = select(scored, &mut rng).unwrap();
            if selection
                .picks
                .wildcard
                .as_ref()
                .is_some_and(|pick| pick.venue.id.as_str() == "liked")
            {
                liked_hits += 1;
            }
        }
        // Expected share: 0.5 + 0.5 / 12 ≈ 0.54 of runs.
        assert!(
            (170..=270).contains(&liked_hits),
            "liked wildcard chosen {liked_hits} times out of {runs}"
        );
    }

    #[rstest]
    fn same_seed_gives_same_selection(trio: Vec<Venue>) {
        let first = select(scored(&trio), &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
        let second = select(scored(&trio), &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
        assert_eq!(first, second);
    }

    #[rstest]
    fn picks_accessors_follow_slots(trio: Vec<Venue>) {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut selection = select(scored(&trio), &mut rng).unwrap();
        assert_eq!(
            selection.picks.get(Slot::BestRated),
            selection.picks.best_rated.as_ref()
        );
        selection.picks.set(Slot::Wildcard, None);
        assert!(selection.picks.get(Slot::Wildcard).is_none());
        assert_eq!(
            selection.pools.get(Slot::BestRated).len(),
            selection.pools.best_rated.len()
        );
    }
}
