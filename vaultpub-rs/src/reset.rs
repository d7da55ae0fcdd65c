//! Clearing a previous export while keeping version-control bookkeeping.

use crate::error::{PublishError, Result};
use log::{debug, info};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Entry names that survive a reset, matched exactly at any depth.
pub const PRESERVED_NAMES: &[&str] = &[".git", ".gitignore"];

/// What a reset did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ResetOutcome {
    /// The directory did not exist; nothing was asked or touched.
    Missing,
    /// Confirmation was refused or not supplied; nothing was touched.
    Declined,
    /// Contents were removed.
    Cleared {
        /// Number of files and directories deleted.
        removed: usize,
        /// Number of preserved entries left in place.
        preserved: usize,
    },
}

/// Check whether an entry name is version-control metadata that must be kept.
pub fn is_preserved(name: &str) -> bool {
    PRESERVED_NAMES.contains(&name)
}

/// Delete everything under `dir` except [`PRESERVED_NAMES`].
///
/// `confirm` runs only when `dir` exists. Without a confirmation callback, or
/// when it returns `false`, the directory is left untouched. `dir` itself is
/// never removed, and neither is any directory still holding a preserved
/// entry.
pub fn clear_dir_preserving_vcs<F>(dir: &Path, confirm: Option<F>) -> Result<ResetOutcome>
where
    F: FnOnce(&Path) -> bool,
{
    if !dir.exists() {
        return Ok(ResetOutcome::Missing);
    }

    let agreed = confirm.map(|f| f(dir)).unwrap_or(false);
    if !agreed {
        debug!("reset of {} declined", dir.display());
        return Ok(ResetOutcome::Declined);
    }

    let mut stats = ClearStats::default();
    clear_contents(dir, &mut stats)?;

    info!(
        "cleared {} ({} removed, {} preserved)",
        dir.display(),
        stats.removed,
        stats.preserved
    );

    Ok(ResetOutcome::Cleared {
        removed: stats.removed,
        preserved: stats.preserved,
    })
}

#[derive(Default)]
struct ClearStats {
    removed: usize,
    preserved: usize,
}

/// Clear the contents of `dir`. Returns true if anything was kept inside it.
fn clear_contents(dir: &Path, stats: &mut ClearStats) -> Result<bool> {
    let mut kept = false;

    let entries = fs::read_dir(dir).map_err(|e| PublishError::fs("read", dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| PublishError::fs("read", dir, e))?;
        let path = entry.path();

        if is_preserved(&entry.file_name().to_string_lossy()) {
            stats.preserved += 1;
            kept = true;
            continue;
        }

        // file_type does not follow symlinks, so linked directories are unlinked, not walked
        let file_type = entry
            .file_type()
            .map_err(|e| PublishError::fs("stat", &path, e))?;

        if file_type.is_dir() {
            if clear_contents(&path, stats)? {
                kept = true;
            } else {
                fs::remove_dir(&path).map_err(|e| PublishError::fs("remove", &path, e))?;
                stats.removed += 1;
            }
        } else {
            fs::remove_file(&path).map_err(|e| PublishError::fs("remove", &path, e))?;
            stats.removed += 1;
        }
    }

    Ok(kept)
}
