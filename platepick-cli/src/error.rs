//! Error types emitted by the PlatePick CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use platepick_core::SpinError;
use platepick_store::StorageError;
use thiserror::Error;

/// Errors emitted by the PlatePick CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// CLI flag name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// Only one of latitude and longitude was supplied.
    #[error("--lat and --lng must be given together")]
    IncompleteLocation,
    /// A category filter value is not a known category.
    #[error("unknown category '{value}'")]
    UnknownCategory {
        /// Rejected value.
        value: String,
    },
    /// Opening the candidate file failed.
    #[error("failed to open candidates at {path:?}: {source}")]
    OpenCandidates {
        /// Candidate file path.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Candidate JSON could not be decoded.
    #[error("failed to parse candidates JSON at {path:?}: {source}")]
    ParseCandidates {
        /// Candidate file path.
        path: Utf8PathBuf,
        /// Decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// The engine did not run.
    #[error(transparent)]
    Spin(#[from] SpinError),
    /// Reading or writing preferences failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
    /// Reading interactive input failed.
    #[error("failed to read input: {0}")]
    ReadInput(#[source] std::io::Error),
}
