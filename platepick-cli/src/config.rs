//! Layered configuration shared by the `spin` and `play` commands.

use camino::Utf8PathBuf;
use clap::Parser;
use geo::Coord;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use platepick_core::{CandidateFilter, Category, ScoringContext, TravelBudget};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::{
    ARG_ADVENTURE, ARG_CATEGORY, ARG_LAT, ARG_LNG, ARG_MAX_MINUTES, ARG_PREFS_DIR, ARG_SEED,
    ARG_CANDIDATES, CliError, DEFAULT_PREFS_DIR, ENV_CANDIDATES,
};

/// CLI arguments for the `spin` and `play` subcommands.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Score a JSON list of nearby venues against your learned \
                 preferences and pick a best-rated venue, a hidden gem and a \
                 wildcard. Location, mode and filters can come from CLI \
                 flags, configuration files, or environment variables.",
    about = "Pick three places to eat"
)]
#[ortho_config(prefix = "PLATEPICK")]
pub(crate) struct SpinArgs {
    /// Path to a JSON array of candidate venues.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) candidates: Option<Utf8PathBuf>,
    /// Directory holding persisted preferences.
    #[arg(long = ARG_PREFS_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) prefs_dir: Option<Utf8PathBuf>,
    /// Your latitude in degrees.
    #[arg(long = ARG_LAT, value_name = "deg", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Your longitude in degrees.
    #[arg(long = ARG_LNG, value_name = "deg", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lng: Option<f64>,
    /// Reward distance instead of penalising it.
    #[arg(
        long = ARG_ADVENTURE,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    #[serde(default)]
    pub(crate) adventure: Option<bool>,
    /// Seed for a reproducible spin.
    #[arg(long = ARG_SEED, value_name = "n")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// Travel-time budget in minutes (5 to 60); needs a location.
    #[arg(long = ARG_MAX_MINUTES, value_name = "minutes")]
    #[serde(default)]
    pub(crate) max_minutes: Option<u32>,
    /// Only consider venues in these categories.
    #[arg(long = ARG_CATEGORY, value_name = "id")]
    #[serde(default)]
    pub(crate) category: Option<Vec<String>>,
}

impl SpinArgs {
    pub(crate) fn into_config(self) -> Result<SpinConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SpinConfig::try_from(merged)
    }
}

/// Resolved `spin` and `play` configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SpinConfig {
    /// Candidate venue file.
    pub(crate) candidates: Utf8PathBuf,
    /// Preference directory.
    pub(crate) prefs_dir: Utf8PathBuf,
    /// Location and mode shared by every venue scored.
    pub(crate) context: ScoringContext,
    /// Category selection; empty keeps every venue.
    pub(crate) categories: Vec<Category>,
    /// Travel budget; only applied when the location is known.
    pub(crate) budget: Option<TravelBudget>,
    /// Seed for the spin RNG.
    pub(crate) seed: Option<u64>,
}

impl SpinConfig {
    /// Filter applied to the raw candidate list.
    pub(crate) fn filter(&self) -> CandidateFilter {
        let filter = CandidateFilter::new().with_categories(self.categories.iter().copied());
        match (self.context.user_location, self.budget) {
            (Some(origin), Some(budget)) => filter.with_travel_budget(origin, budget),
            _ => filter,
        }
    }

    /// RNG seeded from the configuration, or from the OS when unseeded.
    pub(crate) fn rng(&self) -> ChaCha8Rng {
        self.seed
            .map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64)
    }
}

impl TryFrom<SpinArgs> for SpinConfig {
    type Error = CliError;

    fn try_from(args: SpinArgs) -> Result<Self, Self::Error> {
        let candidates = args.candidates.ok_or(CliError::MissingArgument {
            field: ARG_CANDIDATES,
            env: ENV_CANDIDATES,
        })?;
        let prefs_dir = args
            .prefs_dir
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_PREFS_DIR));

        let user_location = match (args.lat, args.lng) {
            (Some(lat), Some(lng)) => Some(Coord { x: lng, y: lat }),
            (None, None) => None,
            _ => return Err(CliError::IncompleteLocation),
        };
        let mut context = ScoringContext::new().with_adventure_mode(args.adventure.unwrap_or(false));
        context.user_location = user_location;

        let categories = args
            .category
            .unwrap_or_default()
            .iter()
            .map(|value| {
                value
                    .parse::<Category>()
                    .map_err(|_| CliError::UnknownCategory {
                        value: value.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            candidates,
            prefs_dir,
            context,
            categories,
            budget: args.max_minutes.map(TravelBudget::from_minutes),
            seed: args.seed,
        })
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SpinConfig, CliError> {
    let merged = SpinArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SpinConfig::try_from(merged)
}
