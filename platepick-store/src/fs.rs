//! Capability-based directory helpers built on `cap-std` and `camino`.

use std::io;
use std::path::MAIN_SEPARATOR_STR;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Open `path` as a directory using ambient authority.
pub(crate) fn open_dir(path: &Utf8Path) -> io::Result<fs_utf8::Dir> {
    fs_utf8::Dir::open_ambient_dir(path, ambient_authority())
}

/// Create `path` and any missing ancestors.
pub(crate) fn ensure_dir(path: &Utf8Path) -> io::Result<()> {
    let (base, relative) = split_base(path)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base.create_dir_all(&relative)
}

/// Split `path` into an ambient base directory and the part below it.
///
/// cap-std refuses absolute paths relative to a `Dir`, so absolute paths are
/// opened from their root (or Windows drive prefix) and relative ones from the
/// working directory.
fn split_base(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let (base, relative) = match path.components().next() {
        Some(Utf8Component::Prefix(prefix)) => {
            let base = Utf8PathBuf::from(prefix.as_str()).join(MAIN_SEPARATOR_STR);
            let relative = path
                .strip_prefix(&base)
                .or_else(|_| path.strip_prefix(prefix.as_str()))
                .map_err(|_| io::Error::other("failed to strip drive prefix from path"))?;
            (base, relative.to_path_buf())
        }
        Some(Utf8Component::RootDir) => {
            let base = Utf8PathBuf::from(MAIN_SEPARATOR_STR);
            let relative = path
                .strip_prefix(&base)
                .map_err(|_| io::Error::other("failed to strip root from path"))?;
            (base, relative.to_path_buf())
        }
        _ => (Utf8PathBuf::from("."), path.to_path_buf()),
    };
    Ok((open_dir(&base)?, relative))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    fn utf8_root(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("temp dir is UTF-8")
    }

    #[rstest]
    fn ensure_dir_creates_nested_absolute_paths() {
        let temp = TempDir::new().expect("temp dir");
        let nested = utf8_root(&temp).join("a").join("b");
        ensure_dir(&nested).expect("create nested dirs");
        assert!(nested.is_dir());
        ensure_dir(&nested).expect("second call is a no-op");
    }

    #[rstest]
    fn open_dir_reports_missing_directories() {
        let temp = TempDir::new().expect("temp dir");
        let missing = utf8_root(&temp).join("missing");
        let err = open_dir(&missing).expect_err("directory does not exist");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
