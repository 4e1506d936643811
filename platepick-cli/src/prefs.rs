//! Prefs command implementation for the PlatePick CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use platepick_store::{FileKeyValueStore, KeyValuePreferenceStore};
use serde::{Deserialize, Serialize};

use crate::render::write_profile;
use crate::{ARG_PREFS_DIR, CliError, DEFAULT_PREFS_DIR};

/// CLI arguments for the `prefs` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Print learned tag affinities as JSON")]
#[ortho_config(prefix = "PLATEPICK")]
pub(crate) struct PrefsArgs {
    /// Directory holding persisted preferences.
    #[arg(long = ARG_PREFS_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) prefs_dir: Option<Utf8PathBuf>,
}

impl PrefsArgs {
    fn into_prefs_dir(self) -> Result<Utf8PathBuf, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        Ok(merged
            .prefs_dir
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_PREFS_DIR)))
    }
}

pub(crate) fn run_prefs(args: PrefsArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_prefs_with(args, &mut stdout)
}

/// Print the stored profile; unlike a spin, a corrupt file is an error here.
pub(crate) fn run_prefs_with(args: PrefsArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let store = KeyValuePreferenceStore::new(FileKeyValueStore::new(args.into_prefs_dir()?));
    write_profile(writer, &store.load()?)
}
