//! Path/resource mapping
//!
//! Builds candidate target paths for logical resource names across the
//! density-qualified resource directories that actually exist, and defines
//! the sync-map types consumed by the synchronization engine.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::PrepResult;

/// Action for one target path in a [`ResourceSyncMap`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// Copy from this source (root-relative) when content differs
    Copy(PathBuf),
    /// Delete the target if present
    Remove,
}

/// Target-path → action mapping, root-relative on both sides
///
/// Built fresh on every run and consumed atomically by the sync engine;
/// paths not present in the map are untouched.
pub type ResourceSyncMap = BTreeMap<PathBuf, SyncAction>;

/// Every icon resource name this tool manages inside mipmap directories
pub const ICON_RESOURCE_NAMES: [&str; 9] = [
    "ic_launcher.png",
    "ic_launcher.9.png",
    "ic_launcher.xml",
    "ic_launcher_background.png",
    "ic_launcher_background.xml",
    "ic_launcher_foreground.png",
    "ic_launcher_foreground.xml",
    "ic_launcher_monochrome.png",
    "ic_launcher_monochrome.xml",
];

/// Candidate target paths for a logical resource name
///
/// Enumerates existing subdirectories of `res_dir` named `base` or
/// `base-<qualifier>` and returns `<dir>/<name>` for each, relative to the
/// project root. Directories are listed in sorted order so the produced
/// sync maps are deterministic.
pub fn map_image_resources(
    project_root: &Path,
    res_dir: &Path,
    base: &str,
    name: &str,
) -> PrepResult<Vec<PathBuf>> {
    let abs = project_root.join(res_dir);
    if !abs.is_dir() {
        return Ok(Vec::new());
    }

    let prefix = format!("{base}-");
    let mut dirs: Vec<String> = Vec::new();
    for entry in std::fs::read_dir(&abs)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let dir_name = entry.file_name().to_string_lossy().into_owned();
        if dir_name == base || dir_name.starts_with(&prefix) {
            dirs.push(dir_name);
        }
    }
    dirs.sort();

    Ok(dirs
        .into_iter()
        .map(|d| res_dir.join(d).join(name))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn maps_only_existing_qualified_directories() {
        let root = tempdir().unwrap();
        let res = root.path().join("app/src/main/res");
        for dir in ["mipmap-mdpi", "mipmap-hdpi", "mipmap-hdpi-v26", "drawable", "values"] {
            std::fs::create_dir_all(res.join(dir)).unwrap();
        }

        let targets = map_image_resources(
            root.path(),
            Path::new("app/src/main/res"),
            "mipmap",
            "ic_launcher.png",
        )
        .unwrap();

        assert_eq!(
            targets,
            vec![
                PathBuf::from("app/src/main/res/mipmap-hdpi/ic_launcher.png"),
                PathBuf::from("app/src/main/res/mipmap-hdpi-v26/ic_launcher.png"),
                PathBuf::from("app/src/main/res/mipmap-mdpi/ic_launcher.png"),
            ]
        );
    }

    #[test]
    fn missing_res_dir_yields_no_candidates() {
        let root = tempdir().unwrap();
        let targets = map_image_resources(
            root.path(),
            Path::new("app/src/main/res"),
            "mipmap",
            "ic_launcher.png",
        )
        .unwrap();
        assert!(targets.is_empty());
    }
}
