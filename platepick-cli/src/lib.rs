//! Command-line interface for the PlatePick recommendation engine.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod candidates;
mod config;
mod error;
mod play;
mod prefs;
mod render;
mod spin;
mod vote;

pub use error::CliError;

use config::SpinArgs;
use prefs::PrefsArgs;
use vote::VoteArgs;

pub(crate) const ARG_CANDIDATES: &str = "candidates";
pub(crate) const ARG_PREFS_DIR: &str = "prefs-dir";
pub(crate) const ARG_LAT: &str = "lat";
pub(crate) const ARG_LNG: &str = "lng";
pub(crate) const ARG_ADVENTURE: &str = "adventure";
pub(crate) const ARG_SEED: &str = "seed";
pub(crate) const ARG_MAX_MINUTES: &str = "max-minutes";
pub(crate) const ARG_CATEGORY: &str = "category";
pub(crate) const ARG_TAG: &str = "tag";
pub(crate) const ARG_LIKE: &str = "like";
pub(crate) const ARG_DISLIKE: &str = "dislike";
pub(crate) const ENV_CANDIDATES: &str = "PLATEPICK_CMDS_SPIN_CANDIDATES";
pub(crate) const ENV_TAG: &str = "PLATEPICK_CMDS_VOTE_TAG";
pub(crate) const ENV_VOTE: &str = "PLATEPICK_CMDS_VOTE_LIKE";

/// Directory used for persisted preferences when none is configured.
pub const DEFAULT_PREFS_DIR: &str = ".platepick";

/// Run the PlatePick CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration, input loading,
/// the engine or output fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Spin(args) => spin::run_spin(args),
        Command::Vote(args) => vote::run_vote(args),
        Command::Prefs(args) => prefs::run_prefs(args),
        Command::Play(args) => play::run_play(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "platepick",
    about = "Spin up three places to eat and learn what you like",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Pick a best-rated venue, a hidden gem and a wildcard from a candidate file.
    Spin(SpinArgs),
    /// Like or dislike a set of category tags.
    Vote(VoteArgs),
    /// Print the learned tag affinities.
    Prefs(PrefsArgs),
    /// Start an interactive session with swap, ban and vote commands.
    Play(SpinArgs),
}

#[cfg(test)]
mod tests;
