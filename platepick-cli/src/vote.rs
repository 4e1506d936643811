//! Vote command implementation for the PlatePick CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use platepick_core::{PreferenceStore, Vote};
use platepick_store::{FileKeyValueStore, KeyValuePreferenceStore};
use serde::{Deserialize, Serialize};

use crate::render::write_profile;
use crate::{
    ARG_DISLIKE, ARG_LIKE, ARG_PREFS_DIR, ARG_TAG, CliError, DEFAULT_PREFS_DIR, ENV_TAG, ENV_VOTE,
};

/// CLI arguments for the `vote` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Record a like or dislike against one or more category \
                 tags. Each vote moves every tag's affinity by one, \
                 bounded to -10..=10.",
    about = "Like or dislike category tags"
)]
#[ortho_config(prefix = "PLATEPICK")]
pub(crate) struct VoteArgs {
    /// Category tag to vote on; repeat for several tags.
    #[arg(long = ARG_TAG, value_name = "tag")]
    #[serde(default)]
    pub(crate) tag: Option<Vec<String>>,
    /// Record a like.
    #[arg(
        long = ARG_LIKE,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        conflicts_with = ARG_DISLIKE
    )]
    #[serde(default)]
    pub(crate) like: Option<bool>,
    /// Record a dislike.
    #[arg(
        long = ARG_DISLIKE,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    #[serde(default)]
    pub(crate) dislike: Option<bool>,
    /// Directory holding persisted preferences.
    #[arg(long = ARG_PREFS_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) prefs_dir: Option<Utf8PathBuf>,
}

impl VoteArgs {
    pub(crate) fn into_config(self) -> Result<VoteConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        VoteConfig::try_from(merged)
    }
}

/// Resolved `vote` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct VoteConfig {
    pub(crate) tags: Vec<String>,
    pub(crate) vote: Vote,
    pub(crate) prefs_dir: Utf8PathBuf,
}

impl TryFrom<VoteArgs> for VoteConfig {
    type Error = CliError;

    fn try_from(args: VoteArgs) -> Result<Self, Self::Error> {
        let tags = args
            .tag
            .filter(|tags| !tags.is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_TAG,
                env: ENV_TAG,
            })?;
        let vote = match (args.like, args.dislike) {
            (Some(true), _) => Vote::Like,
            (_, Some(true)) => Vote::Dislike,
            _ => {
                return Err(CliError::MissingArgument {
                    field: ARG_LIKE,
                    env: ENV_VOTE,
                });
            }
        };
        Ok(Self {
            tags,
            vote,
            prefs_dir: args
                .prefs_dir
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_PREFS_DIR)),
        })
    }
}

pub(crate) fn run_vote(args: VoteArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_vote_with(args, &mut stdout)
}

/// Apply the vote and print the updated profile.
///
/// Reading stays fail-soft like any preference store, but a failed write is
/// reported so the user knows the vote was not kept.
pub(crate) fn run_vote_with(args: VoteArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let mut store = KeyValuePreferenceStore::new(FileKeyValueStore::new(config.prefs_dir));
    let mut profile = store.get_all();
    profile.apply_vote(&config.tags, config.vote);
    store.save(&profile)?;
    write_profile(writer, &profile)
}
