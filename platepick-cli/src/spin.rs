//! Spin command implementation for the PlatePick CLI.

use std::io::Write;

use platepick_core::{PreferenceStore, Session};
use platepick_store::{FileKeyValueStore, KeyValuePreferenceStore};

use crate::CliError;
use crate::candidates::load_candidates;
use crate::config::{SpinArgs, SpinConfig};
use crate::render::{SpinReport, write_json};

pub(crate) fn run_spin(args: SpinArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_spin_with(args, &mut stdout)
}

pub(crate) fn run_spin_with(args: SpinArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let store = open_preferences(&config);
    spin_once(&config, store, writer)
}

/// Preference store rooted at the configured directory.
pub(crate) fn open_preferences(config: &SpinConfig) -> KeyValuePreferenceStore<FileKeyValueStore> {
    KeyValuePreferenceStore::new(FileKeyValueStore::new(config.prefs_dir.clone()))
}

/// Load, filter and spin once, writing the picks as JSON.
pub(crate) fn spin_once<S: PreferenceStore>(
    config: &SpinConfig,
    store: S,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let candidates = config.filter().apply(&load_candidates(&config.candidates)?);
    let mut session = Session::new(store);
    let mut rng = config.rng();
    let spin = session.spin(&candidates, &config.context, &mut rng)?;
    write_json(writer, &SpinReport::from(spin))
}
