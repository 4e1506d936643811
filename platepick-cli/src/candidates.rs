//! Candidate venue records as returned by a place-search provider.

use std::io::BufReader;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use geo::Coord;
use platepick_core::Venue;
use serde::{Deserialize, Serialize};

use crate::CliError;

/// One venue in the candidate file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub(crate) struct CandidateRecord {
    pub(crate) place_id: String,
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) rating: Option<f64>,
    #[serde(default)]
    pub(crate) user_ratings_total: Option<u32>,
    #[serde(default)]
    pub(crate) types: Vec<String>,
    #[serde(default)]
    pub(crate) location: Option<LatLng>,
}

/// Provider coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub(crate) struct LatLng {
    pub(crate) lat: f64,
    pub(crate) lng: f64,
}

impl From<CandidateRecord> for Venue {
    fn from(record: CandidateRecord) -> Self {
        let mut venue = Self::new(record.place_id, record.name).with_tags(record.types);
        venue.rating = record.rating;
        venue.review_count = record.user_ratings_total;
        venue.location = record.location.map(|LatLng { lat, lng }| Coord { x: lng, y: lat });
        venue
    }
}

/// Load a JSON array of candidate records from `path`.
pub(crate) fn load_candidates(path: &Utf8Path) -> Result<Vec<Venue>, CliError> {
    let file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
        CliError::OpenCandidates {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let records: Vec<CandidateRecord> =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            CliError::ParseCandidates {
                path: path.to_path_buf(),
                source,
            }
        })?;
    Ok(records.into_iter().map(Venue::from).collect())
}
