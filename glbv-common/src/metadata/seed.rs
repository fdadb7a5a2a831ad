//! Idempotent `status: pending` seeding
//!
//! Seeding only touches metadata files that already exist. The structured
//! path is used whenever the file parses as a mapping; anything else falls
//! back to a purely textual append. The textual path never parses, so a
//! `status:` line nested under another key also counts as present there.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

use super::store::{self, LoadedMetadata};
use super::{Status, VideoMetadata};

static STATUS_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*status\s*:\s*.+$").expect("status line pattern is valid"));

const PENDING_LINE: &str = "status: pending\n";

/// How a seeding attempt updates the file, chosen from the parse result
#[derive(Debug, Clone, PartialEq)]
pub enum SeedStrategy {
    /// File is a mapping: add the key and rewrite it
    Structured(VideoMetadata),
    /// File is not a mapping: append a `status: pending` line
    TextualAppendFallback,
}

/// Why a seeding attempt did or did not change the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedReason {
    UpdatedStructured,
    AppendedWithText,
    AlreadyHasStatus,
    AlreadyHasStatusText,
    MetadataMissing,
    ReadFailed,
    WriteFailed,
}

impl SeedReason {
    /// True if the file was modified
    pub fn changed(self) -> bool {
        matches!(self, SeedReason::UpdatedStructured | SeedReason::AppendedWithText)
    }

    /// True if the attempt hit an I/O failure
    pub fn is_error(self) -> bool {
        matches!(self, SeedReason::ReadFailed | SeedReason::WriteFailed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SeedReason::UpdatedStructured => "updated_structured",
            SeedReason::AppendedWithText => "appended_with_text",
            SeedReason::AlreadyHasStatus => "already_has_status",
            SeedReason::AlreadyHasStatusText => "already_has_status_text",
            SeedReason::MetadataMissing => "metadata_missing",
            SeedReason::ReadFailed => "read_failed",
            SeedReason::WriteFailed => "write_failed",
        }
    }
}

impl std::fmt::Display for SeedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SeedStrategy {
    /// Pick the strategy for a loaded file; `None` when there is no file
    pub fn select(loaded: LoadedMetadata) -> Option<Self> {
        match loaded {
            LoadedMetadata::Missing => None,
            LoadedMetadata::Parsed(meta) => Some(SeedStrategy::Structured(meta)),
            LoadedMetadata::Malformed { reason } => {
                debug!("Falling back to text append: {}", reason);
                Some(SeedStrategy::TextualAppendFallback)
            }
        }
    }

    /// Apply the strategy to the metadata file of `video_dir`
    pub fn apply(self, video_dir: &Path) -> SeedReason {
        match self {
            SeedStrategy::Structured(meta) => seed_structured(video_dir, meta),
            SeedStrategy::TextualAppendFallback => seed_textual(video_dir),
        }
    }
}

/// Add `status: pending` to the metadata of `video_dir` unless a status exists
pub fn seed_pending_status(video_dir: &Path) -> SeedReason {
    let loaded = match store::load(video_dir) {
        Ok(loaded) => loaded,
        Err(e) => {
            warn!("Cannot read metadata in {}: {}", video_dir.display(), e);
            return SeedReason::ReadFailed;
        }
    };

    match SeedStrategy::select(loaded) {
        Some(strategy) => strategy.apply(video_dir),
        None => SeedReason::MetadataMissing,
    }
}

fn seed_structured(video_dir: &Path, mut meta: VideoMetadata) -> SeedReason {
    if meta.has_status() {
        return SeedReason::AlreadyHasStatus;
    }

    meta.status = Some(Status::pending());
    match store::save(video_dir, &meta) {
        Ok(_) => SeedReason::UpdatedStructured,
        Err(e) => {
            warn!("{}", e);
            SeedReason::WriteFailed
        }
    }
}

fn seed_textual(video_dir: &Path) -> SeedReason {
    let path = store::metadata_path(video_dir);
    let content = match fs::read(&path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            warn!("Cannot read {}: {}", path.display(), e);
            return SeedReason::ReadFailed;
        }
    };

    if STATUS_LINE.is_match(&content) {
        return SeedReason::AlreadyHasStatusText;
    }

    let needs_newline = !content.is_empty() && !content.ends_with('\n');
    let result = OpenOptions::new().append(true).open(&path).and_then(|mut file| {
        if needs_newline {
            file.write_all(b"\n")?;
        }
        file.write_all(PENDING_LINE.as_bytes())
    });

    match result {
        Ok(()) => SeedReason::AppendedWithText,
        Err(e) => {
            warn!("Cannot append to {}: {}", path.display(), e);
            SeedReason::WriteFailed
        }
    }
}
