//! Test helpers for writing candidate files and driving commands.

use super::*;
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;

/// Temporary workspace holding a candidate file and a preference directory.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    pub(super) candidates: Utf8PathBuf,
    pub(super) prefs_dir: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self {
            _dir: dir,
            candidates: root.join("candidates.json"),
            prefs_dir: root.join("prefs"),
        }
    }

    pub(super) fn write_candidates(&self, records: &[Value]) {
        let payload = serde_json::to_string_pretty(records).expect("serialise candidates");
        write_utf8(&self.candidates, payload.as_bytes());
    }

    pub(super) fn prefs_file(&self) -> Utf8PathBuf {
        self.prefs_dir.join("platepick_prefs.json")
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directory");
    }
    fs::write(path, contents).expect("write file");
}

pub(super) fn record(id: &str, name: &str, rating: f64, reviews: u32, tag: &str) -> Value {
    json!({
        "place_id": id,
        "name": name,
        "rating": rating,
        "user_ratings_total": reviews,
        "types": [tag],
    })
}

/// Alpha is the safe bet, Bravo the hidden gem and Charlie the crowd pleaser.
pub(super) fn trio_records() -> Vec<Value> {
    vec![
        record("a", "Alpha", 4.8, 500, "cafe"),
        record("b", "Bravo", 4.6, 40, "bakery"),
        record("c", "Charlie", 3.9, 5000, "pizza_restaurant"),
    ]
}

/// Parse `argv` the way the binary does.
pub(super) fn parse(argv: &[&str]) -> Result<Command, CliError> {
    let mut full = vec!["platepick"];
    full.extend_from_slice(argv);
    Cli::try_parse_from(full)
        .map(|cli| cli.command)
        .map_err(CliError::from)
}
