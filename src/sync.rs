//! File synchronization engine
//!
//! The core idempotent-merge primitive: given a target-path → action map
//! and a root directory, copy targets whose content differs from their
//! source, delete targets marked for removal, and leave identical files
//! untouched. Change detection is by SHA-256 content hash; writes go
//! through a tempfile-and-rename so a crash never leaves a half-written
//! managed file.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use walkdir::WalkDir;

use crate::error::{PrepError, PrepResult};
use crate::events::EventSink;
use crate::resources::{ResourceSyncMap, SyncAction};

/// Outcome of applying a sync map
#[derive(Debug, Clone, Default)]
pub struct SyncStats {
    /// Targets written or overwritten
    pub copied: Vec<PathBuf>,
    /// Targets deleted
    pub removed: Vec<PathBuf>,
    /// Targets already identical to their source
    pub unchanged: Vec<PathBuf>,
}

impl SyncStats {
    fn merge(&mut self, other: SyncStats) {
        self.copied.extend(other.copied);
        self.removed.extend(other.removed);
        self.unchanged.extend(other.unchanged);
    }
}

/// Write content to a file atomically via tempfile + rename
pub fn atomic_write(path: &Path, content: &[u8]) -> PrepResult<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent)?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(content)?;
    tmp.persist(path).map_err(|e| PrepError::Io(e.error))?;
    Ok(())
}

/// SHA-256 hash of a file's content
pub fn hash_file(path: &Path) -> PrepResult<String> {
    let content = std::fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&content);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Apply a sync map relative to `root`
///
/// Copy actions fail when the declared source does not exist; remove
/// actions are no-ops for absent targets. Paths not present in the map are
/// untouched.
pub fn apply(root: &Path, map: &ResourceSyncMap, sink: &dyn EventSink) -> PrepResult<SyncStats> {
    let mut stats = SyncStats::default();

    for (target, action) in map {
        let target_abs = root.join(target);
        match action {
            SyncAction::Copy(source) => {
                let source_abs = root.join(source);
                if !source_abs.is_file() {
                    return Err(PrepError::SourceNotFound { path: source_abs });
                }
                if target_abs.is_file() && hash_file(&source_abs)? == hash_file(&target_abs)? {
                    sink.verbose(format!("up to date: {}", target.display()));
                    stats.unchanged.push(target.clone());
                    continue;
                }
                atomic_write(&target_abs, &std::fs::read(&source_abs)?)?;
                sink.verbose(format!(
                    "copied {} -> {}",
                    source.display(),
                    target.display()
                ));
                stats.copied.push(target.clone());
            }
            SyncAction::Remove => {
                if target_abs.is_file() {
                    std::fs::remove_file(&target_abs)?;
                    sink.verbose(format!("removed {}", target.display()));
                    stats.removed.push(target.clone());
                }
            }
        }
    }

    Ok(stats)
}

/// Exhaustive directory merge
///
/// Mirrors `source` into `dest` and deletes every file under `dest` that
/// has no counterpart in `source`. A `None` source means "delete
/// everything under `dest`". Both paths are root-relative.
pub fn sync_dir(
    root: &Path,
    source: Option<&Path>,
    dest: &Path,
    sink: &dyn EventSink,
) -> PrepResult<SyncStats> {
    let mut map = ResourceSyncMap::new();
    let mut expected: BTreeSet<PathBuf> = BTreeSet::new();

    if let Some(source) = source {
        let source_abs = root.join(source);
        if source_abs.is_dir() {
            for entry in WalkDir::new(&source_abs).sort_by_file_name() {
                let entry = entry.map_err(|e| {
                    PrepError::Io(e.into())
                })?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let rel = entry
                    .path()
                    .strip_prefix(&source_abs)
                    .expect("walked path is under its walk root")
                    .to_path_buf();
                expected.insert(rel.clone());
                map.insert(dest.join(&rel), SyncAction::Copy(source.join(&rel)));
            }
        }
    }

    // Anything already under dest but absent from the source set is stale.
    let dest_abs = root.join(dest);
    if dest_abs.is_dir() {
        for entry in WalkDir::new(&dest_abs).sort_by_file_name() {
            let entry = entry.map_err(|e| PrepError::Io(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(&dest_abs)
                .expect("walked path is under its walk root")
                .to_path_buf();
            if !expected.contains(&rel) {
                map.insert(dest.join(&rel), SyncAction::Remove);
            }
        }
    }

    let mut stats = SyncStats::default();
    stats.merge(apply(root, &map, sink)?);
    remove_empty_dirs(&dest_abs)?;
    Ok(stats)
}

// Directory-level merges delete whole subtrees; drop the husks they leave.
fn remove_empty_dirs(dir: &Path) -> PrepResult<()> {
    if !dir.is_dir() {
        return Ok(());
    }
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            remove_empty_dirs(&path)?;
            if std::fs::read_dir(&path)?.next().is_none() {
                std::fs::remove_dir(&path)?;
            }
        }
    }
    Ok(())
}
