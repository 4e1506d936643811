//! Facade crate for the PlatePick venue recommendation engine.
//!
//! This crate re-exports the core scoring, selection and session types and
//! exposes the file-backed preference store behind a feature flag.

#![forbid(unsafe_code)]

pub use platepick_core::{
    CandidateFilter, Category, Picks, Pools, PreferenceProfile, PreferenceStore, ScoredVenue,
    ScoringContext, SelectError, Selection, Session, SessionError, Slot, Spin, SpinError, SpinId,
    TravelBudget, Venue, VenueId, Vote, score_venue, score_venues, select,
};

#[cfg(feature = "store-file")]
pub use platepick_store::{
    FileKeyValueStore, KeyValuePreferenceStore, KeyValueStore, MemoryKeyValueStore, StorageError,
};
