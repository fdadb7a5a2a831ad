//! Lifecycle sweeper
//!
//! Deletes every video directory of the legacy flat layout whose metadata
//! `status` equals `delete` (any case). Irreversible: there is no dry run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::layout::walk_flat;
use crate::metadata::{self, LoadedMetadata};
use crate::Result;

/// What happened to one video directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepAction {
    Deleted,
    /// Not deleted; carries the reason when one is worth reporting
    Skipped(Option<String>),
    Failed(String),
}

/// One visited directory and what was done with it
#[derive(Debug, Clone)]
pub struct SweepEntry {
    pub name: String,
    pub dir: PathBuf,
    pub action: SweepAction,
}

/// Aggregate result of one sweep
#[derive(Debug, Clone, Default)]
pub struct SweepSummary {
    pub entries: Vec<SweepEntry>,
}

impl SweepSummary {
    pub fn deleted(&self) -> usize {
        self.count(|a| matches!(a, SweepAction::Deleted))
    }

    pub fn skipped(&self) -> usize {
        self.count(|a| matches!(a, SweepAction::Skipped(_)))
    }

    pub fn errors(&self) -> usize {
        self.count(|a| matches!(a, SweepAction::Failed(_)))
    }

    pub fn is_success(&self) -> bool {
        self.errors() == 0
    }

    fn count(&self, pred: impl Fn(&SweepAction) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.action)).count()
    }
}

/// Decide what to do with one video directory without touching it
pub fn classify(video_dir: &Path) -> SweepAction {
    match metadata::load(video_dir) {
        Ok(LoadedMetadata::Parsed(meta)) if meta.is_marked_for_deletion() => SweepAction::Deleted,
        Ok(LoadedMetadata::Parsed(meta)) if meta.is_empty() => no_metadata(),
        Ok(LoadedMetadata::Parsed(_)) => SweepAction::Skipped(None),
        Ok(LoadedMetadata::Missing) => no_metadata(),
        Ok(LoadedMetadata::Malformed { reason }) => {
            warn!("Could not parse metadata in {}: {}", video_dir.display(), reason);
            SweepAction::Skipped(Some(format!("Unparsable metadata: {}", reason)))
        }
        Err(e) => {
            warn!("Could not read metadata in {}: {}", video_dir.display(), e);
            SweepAction::Skipped(Some(format!("Unreadable metadata: {}", e)))
        }
    }
}

fn no_metadata() -> SweepAction {
    SweepAction::Skipped(Some("No metadata".to_string()))
}

/// Remove every video directory under `videos_root` marked `status: delete`
///
/// Only a missing `videos_root` aborts the sweep.
pub fn sweep(videos_root: &Path) -> Result<SweepSummary> {
    sweep_with(videos_root, |dir| fs::remove_dir_all(dir))
}

/// [`sweep`] with the directory removal supplied by the caller
///
/// A failed removal is recorded as [`SweepAction::Failed`] and the sweep
/// moves on to the next directory.
pub fn sweep_with<F>(videos_root: &Path, mut remove: F) -> Result<SweepSummary>
where
    F: FnMut(&Path) -> io::Result<()>,
{
    let mut summary = SweepSummary::default();

    for dir in walk_flat(videos_root)? {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let action = match classify(&dir) {
            SweepAction::Deleted => match remove(&dir) {
                Ok(()) => {
                    info!("Deleted {}", dir.display());
                    SweepAction::Deleted
                }
                Err(e) => {
                    warn!("Failed to delete {}: {}", dir.display(), e);
                    SweepAction::Failed(e.to_string())
                }
            },
            other => other,
        };

        summary.entries.push(SweepEntry { name, dir, action });
    }

    Ok(summary)
}
