//! Session-scoped pool management: spin, swap, ban and vote.
//!
//! A [`Session`] owns the preference store, the ban list and the vote map for
//! as long as the user keeps the app open. Each successful spin replaces the
//! current picks and pools wholesale and receives a fresh [`SpinId`]; swap and
//! ban requests carry the id they were issued against and are rejected when it
//! no longer matches, so a late tap never edits the wrong pools.

use std::collections::{HashMap, HashSet};
use std::fmt;

use log::debug;
use rand::Rng;
use thiserror::Error;

use crate::{
    Picks, Pools, PreferenceStore, ScoredVenue, ScoringContext, SelectError, Slot, Venue, VenueId,
    Vote, score_venues, select,
};

/// Monotonically increasing identifier of a spin within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SpinId(u64);

impl SpinId {
    /// Raw generation number; the first spin of a session is `1`.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SpinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The outcome of one successful spin.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Spin {
    /// Generation this spin belongs to.
    pub id: SpinId,
    /// Venues currently shown.
    pub picks: Picks,
    /// Frozen replacement material.
    pub pools: Pools,
}

/// Errors returned by [`Session::spin`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpinError {
    /// Too few usable candidates after excluding banned venues; the engine
    /// did not run.
    #[error("not enough venues to spin: {available} usable, {required} required")]
    InsufficientCandidates {
        /// Usable candidates.
        available: usize,
        /// Candidates required.
        required: usize,
    },
}

impl From<SelectError> for SpinError {
    fn from(err: SelectError) -> Self {
        match err {
            SelectError::InsufficientCandidates {
                available,
                required,
            } => Self::InsufficientCandidates {
                available,
                required,
            },
        }
    }
}

/// Errors returned by [`Session::swap`] and [`Session::ban`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No spin has completed yet, or the last one found too few venues.
    #[error("no active spin")]
    NoActiveSpin,
    /// The request targets pools that a newer spin has replaced.
    #[error("spin {requested} is stale; current spin is {current}")]
    StaleSpin {
        /// Spin the caller acted on.
        requested: SpinId,
        /// Spin currently shown.
        current: SpinId,
    },
}

/// Interactive state for one user session.
///
/// # Examples
/// ```
/// use platepick_core::{
///     PreferenceProfile, PreferenceStore, ScoringContext, Session, Slot, Venue, Vote,
/// };
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// #[derive(Default)]
/// struct InMemory(PreferenceProfile);
///
/// impl PreferenceStore for InMemory {
///     fn get_all(&self) -> PreferenceProfile {
///         self.0.clone()
///     }
///     fn record_vote(&mut self, tags: &[&str], vote: Vote) {
///         self.0.apply_vote(tags.iter().copied(), vote);
///     }
/// }
///
/// let venues = vec![
///     Venue::new("a", "Alpha").with_rating(4.8).with_review_count(500),
///     Venue::new("b", "Bravo").with_rating(4.6).with_review_count(40),
///     Venue::new("c", "Charlie").with_rating(3.9).with_review_count(5000),
///     Venue::new("d", "Delta").with_rating(4.2).with_review_count(800),
/// ];
/// let mut session = Session::new(InMemory::default());
/// let mut rng = StdRng::seed_from_u64(9);
///
/// let spin_id = session.spin(&venues, &ScoringContext::new(), &mut rng)?.id;
/// let shown = session.current().and_then(|spin| spin.picks.best_rated.clone());
/// let replacement = session.swap(spin_id, Slot::BestRated)?;
/// assert_ne!(replacement.map(|s| &s.venue.id), shown.as_ref().map(|s| &s.venue.id));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Session<S> {
    store: S,
    banned: HashSet<VenueId>,
    votes: HashMap<VenueId, Vote>,
    current: Option<Spin>,
    last_spin: u64,
}

impl<S: PreferenceStore> Session<S> {
    /// Start a session backed by `store`.
    pub fn new(store: S) -> Self {
        Self {
            store,
            banned: HashSet::new(),
            votes: HashMap::new(),
            current: None,
            last_spin: 0,
        }
    }

    /// Score and select a fresh set of picks.
    ///
    /// Banned venues are dropped before scoring, preferences are read once,
    /// and the resulting picks and pools replace the previous spin. When too
    /// few candidates remain the previous spin is discarded as well, so no
    /// stale picks stay visible.
    ///
    /// # Errors
    /// Returns [`SpinError::InsufficientCandidates`] when fewer than three
    /// unbanned candidates are available.
    pub fn spin<R>(
        &mut self,
        candidates: &[Venue],
        context: &ScoringContext,
        rng: &mut R,
    ) -> Result<&Spin, SpinError>
    where
        R: Rng + ?Sized,
    {
        self.last_spin = self.last_spin.saturating_add(1);
        let id = SpinId(self.last_spin);

        let eligible: Vec<Venue> = candidates
            .iter()
            .filter(|venue| !self.banned.contains(&venue.id))
            .cloned()
            .collect();
        let profile = self.store.get_all();
        let scored = score_venues(&eligible, &profile, context);

        match select(scored, rng) {
            Ok(selection) => Ok(&*self.current.insert(Spin {
                id,
                picks: selection.picks,
                pools: selection.pools,
            })),
            Err(err) => {
                debug!("spin {id} did not run: {err}");
                self.current = None;
                Err(err.into())
            }
        }
    }

    /// Replace the pick in `slot` with the next unused, unbanned venue from
    /// its pool.
    ///
    /// The replacement is the first eligible venue in pool order, so repeated
    /// swaps walk the pool predictably. When nothing is eligible the slot is
    /// left untouched.
    ///
    /// # Errors
    /// Returns [`SessionError`] when `spin` is not the current spin.
    pub fn swap(&mut self, spin: SpinId, slot: Slot) -> Result<Option<&ScoredVenue>, SessionError> {
        let current = active_spin(self.current.as_mut(), spin)?;
        if let Some(replacement) = next_in_pool(current, slot, &self.banned) {
            current.picks.set(slot, Some(replacement));
        }
        Ok(current.picks.get(slot))
    }

    /// Ban `venue` for the rest of the session and refill `slot`.
    ///
    /// `venue` is normally the pick shown in `slot`. Any other slot still
    /// showing it is refilled from its own pool as well. Unlike
    /// [`swap`](Self::swap), an exhausted pool empties the slot: a banned
    /// venue is never shown again.
    ///
    /// # Errors
    /// Returns [`SessionError`] when `spin` is not the current spin; the ban
    /// list is left unchanged in that case.
    pub fn ban(
        &mut self,
        spin: SpinId,
        venue: &VenueId,
        slot: Slot,
    ) -> Result<Option<&ScoredVenue>, SessionError> {
        let current = active_spin(self.current.as_mut(), spin)?;
        self.banned.insert(venue.clone());

        let mut targets = vec![slot];
        targets.extend(Slot::ALL.into_iter().filter(|other| {
            *other != slot
                && current
                    .picks
                    .get(*other)
                    .is_some_and(|pick| pick.venue.id == *venue)
        }));
        for target in targets {
            let replacement = next_in_pool(current, target, &self.banned);
            current.picks.set(target, replacement);
        }
        Ok(current.picks.get(slot))
    }

    /// Record a vote on `venue`'s tags and remember it for display.
    ///
    /// Current picks and pools are unaffected; the vote only shapes future
    /// spins.
    pub fn vote(&mut self, venue: &Venue, vote: Vote) {
        let tags: Vec<&str> = venue.tags.iter().map(String::as_str).collect();
        self.store.record_vote(&tags, vote);
        self.votes.insert(venue.id.clone(), vote);
    }

    /// The last vote cast on a venue during this session.
    #[must_use]
    pub fn vote_for(&self, venue: &VenueId) -> Option<Vote> {
        self.votes.get(venue).copied()
    }

    /// Whether a venue has been banned during this session.
    #[must_use]
    pub fn is_banned(&self, venue: &VenueId) -> bool {
        self.banned.contains(venue)
    }

    /// Every venue banned during this session.
    #[must_use]
    pub const fn ban_list(&self) -> &HashSet<VenueId> {
        &self.banned
    }

    /// The current spin, if the last spin succeeded.
    #[must_use]
    pub const fn current(&self) -> Option<&Spin> {
        self.current.as_ref()
    }

    /// Borrow the preference store.
    #[must_use]
    pub const fn preferences(&self) -> &S {
        &self.store
    }

    /// End the session and hand back the store.
    pub fn into_store(self) -> S {
        self.store
    }
}

fn active_spin(current: Option<&mut Spin>, requested: SpinId) -> Result<&mut Spin, SessionError> {
    match current {
        None => Err(SessionError::NoActiveSpin),
        Some(spin) if spin.id != requested => {
            debug!("rejecting request for spin {requested}; current is {}", spin.id);
            Err(SessionError::StaleSpin {
                requested,
                current: spin.id,
            })
        }
        Some(spin) => Ok(spin),
    }
}

fn next_in_pool(spin: &Spin, slot: Slot, banned: &HashSet<VenueId>) -> Option<ScoredVenue> {
    let used = spin.picks.ids();
    spin.pools
        .get(slot)
        .iter()
        .find(|candidate| !used.contains(&candidate.venue.id) && !banned.contains(&candidate.venue.id))
        .cloned()
}
