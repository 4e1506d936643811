//! Output formats for spins and preference profiles.

use std::collections::BTreeMap;
use std::io::Write;

use platepick_core::{PreferenceProfile, ScoredVenue, Slot, Spin};
use serde::Serialize;

use crate::CliError;

/// JSON view of one spin.
#[derive(Debug, Serialize)]
pub(crate) struct SpinReport<'a> {
    pub(crate) spin: u64,
    pub(crate) picks: BTreeMap<Slot, Option<PickReport<'a>>>,
}

/// JSON view of one pick.
#[derive(Debug, Serialize)]
pub(crate) struct PickReport<'a> {
    pub(crate) id: &'a str,
    pub(crate) name: &'a str,
    pub(crate) rating: Option<f64>,
    pub(crate) review_count: Option<u32>,
    pub(crate) preference_score: i32,
    pub(crate) effective_score: f64,
}

impl<'a> From<&'a ScoredVenue> for PickReport<'a> {
    fn from(scored: &'a ScoredVenue) -> Self {
        Self {
            id: scored.venue.id.as_str(),
            name: &scored.venue.name,
            rating: scored.venue.rating,
            review_count: scored.venue.review_count,
            preference_score: scored.preference_score,
            effective_score: scored.effective_score,
        }
    }
}

impl<'a> From<&'a Spin> for SpinReport<'a> {
    fn from(spin: &'a Spin) -> Self {
        Self {
            spin: spin.id.get(),
            picks: spin
                .picks
                .iter()
                .map(|(slot, pick)| (slot, pick.map(PickReport::from)))
                .collect(),
        }
    }
}

/// Write `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writeln!(writer, "{payload}").map_err(CliError::WriteOutput)
}

/// Write the profile as a JSON object of tag → affinity.
pub(crate) fn write_profile(
    writer: &mut dyn Write,
    profile: &PreferenceProfile,
) -> Result<(), CliError> {
    write_json(writer, profile.as_map())
}

/// One human-readable line for a slot.
pub(crate) fn slot_line(slot: Slot, pick: Option<&ScoredVenue>) -> String {
    let Some(scored) = pick else {
        return format!("{:<11} (nothing left)", slot.label());
    };
    let venue = &scored.venue;
    let rating = venue
        .rating
        .map_or_else(|| "unrated".to_owned(), |rating| format!("{rating:.1}*"));
    let reviews = venue
        .review_count
        .map_or_else(String::new, |count| format!(", {count} reviews"));
    format!(
        "{:<11} {} ({rating}{reviews}) score {:.2}",
        slot.label(),
        venue.name,
        scored.effective_score
    )
}

/// Write every slot of `spin` as text.
pub(crate) fn write_spin_text(writer: &mut dyn Write, spin: &Spin) -> Result<(), CliError> {
    writeln!(writer, "spin {}", spin.id).map_err(CliError::WriteOutput)?;
    for (slot, pick) in spin.picks.iter() {
        writeln!(writer, "  {}", slot_line(slot, pick)).map_err(CliError::WriteOutput)?;
    }
    Ok(())
}
