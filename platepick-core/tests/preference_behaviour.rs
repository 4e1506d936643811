//! Behavioural tests for vote-driven preference learning.

use std::cell::RefCell;

use platepick_core::test_support::MemoryPreferenceStore;
use platepick_core::{PreferenceStore, ScoringContext, Venue, Vote, score_venue};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Debug, Default)]
struct PreferenceWorld {
    store: RefCell<MemoryPreferenceStore>,
}

#[fixture]
fn world() -> PreferenceWorld {
    PreferenceWorld::default()
}

fn cafe() -> Venue {
    Venue::new("cafe-1", "Corner Cafe")
        .with_rating(4.0)
        .with_tags(["cafe"])
}

fn vote_times(world: &PreferenceWorld, vote: Vote, times: usize) {
    let mut store = world.store.borrow_mut();
    for _ in 0..times {
        store.record_vote(&["cafe"], vote);
    }
}

#[given("an empty preference store")]
fn given_empty_store(world: &PreferenceWorld) {
    world.store.replace(MemoryPreferenceStore::default());
}

#[when("I like a cafe venue 15 times")]
fn when_like_15(world: &PreferenceWorld) {
    vote_times(world, Vote::Like, 15);
}

#[when("I dislike a cafe venue 15 times")]
fn when_dislike_15(world: &PreferenceWorld) {
    vote_times(world, Vote::Dislike, 15);
}

#[when("I like a cafe venue 2 times")]
fn when_like_2(world: &PreferenceWorld) {
    vote_times(world, Vote::Like, 2);
}

#[then("the cafe affinity is 10")]
fn then_cafe_max(world: &PreferenceWorld) {
    assert_eq!(world.store.borrow().get_all().affinity("cafe"), 10);
}

#[then("the cafe affinity is -10")]
fn then_cafe_min(world: &PreferenceWorld) {
    assert_eq!(world.store.borrow().get_all().affinity("cafe"), -10);
}

#[then("a cafe outranks an equally rated pizzeria")]
fn then_cafe_outranks(world: &PreferenceWorld) {
    let profile = world.store.borrow().get_all();
    let pizzeria = Venue::new("pizza-1", "Slice")
        .with_rating(4.0)
        .with_tags(["pizza_restaurant"]);
    let context = ScoringContext::new();
    let cafe_score = score_venue(&cafe(), &profile, &context);
    let pizza_score = score_venue(&pizzeria, &profile, &context);
    assert_eq!(cafe_score.preference_score, 2);
    assert!(cafe_score.effective_score > pizza_score.effective_score);
}

#[scenario(path = "tests/features/preferences.feature", index = 0)]
fn affinity_saturates_at_upper_bound(world: PreferenceWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/preferences.feature", index = 1)]
fn affinity_saturates_at_lower_bound(world: PreferenceWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/preferences.feature", index = 2)]
fn liked_tags_lift_a_venue(world: PreferenceWorld) {
    let _ = world;
}
