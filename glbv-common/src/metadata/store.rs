//! `metadata.yaml` store accessor
//!
//! Reads, shallow-merges and rewrites the metadata of one video directory.
//! There is no locking: concurrent writers race and the last write wins.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::VideoMetadata;
use crate::layout::METADATA_FILE;
use crate::{Error, Result};

/// Outcome of reading one `metadata.yaml`
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedMetadata {
    /// No file in the directory
    Missing,
    /// File parsed as a string-keyed mapping (an empty file is an empty mapping)
    Parsed(VideoMetadata),
    /// File exists but is not valid YAML, not UTF-8, or not a mapping
    Malformed { reason: String },
}

/// Path of the metadata file inside a video directory
pub fn metadata_path(video_dir: &Path) -> PathBuf {
    video_dir.join(METADATA_FILE)
}

/// Read and classify the metadata of `video_dir`
///
/// Only genuine I/O failures (permissions, etc.) are returned as errors.
pub fn load(video_dir: &Path) -> Result<LoadedMetadata> {
    let path = metadata_path(video_dir);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(LoadedMetadata::Missing),
        Err(e) if e.kind() == ErrorKind::InvalidData => {
            return Ok(LoadedMetadata::Malformed {
                reason: "file is not valid UTF-8".to_string(),
            })
        }
        Err(e) => return Err(Error::Io(e)),
    };

    Ok(parse(&content))
}

/// Classify YAML text as a metadata mapping
pub fn parse(content: &str) -> LoadedMetadata {
    if content.trim().is_empty() {
        return LoadedMetadata::Parsed(VideoMetadata::default());
    }

    let value = match serde_yaml::from_str::<serde_yaml::Value>(content) {
        Ok(value) => value,
        Err(e) => {
            return LoadedMetadata::Malformed {
                reason: e.to_string(),
            }
        }
    };

    match VideoMetadata::try_from(value) {
        Ok(meta) => LoadedMetadata::Parsed(meta),
        Err(e) => LoadedMetadata::Malformed {
            reason: e.to_string(),
        },
    }
}

/// Existing metadata, or an empty mapping if the file is absent
pub fn load_or_empty(video_dir: &Path) -> Result<VideoMetadata> {
    match load(video_dir)? {
        LoadedMetadata::Missing => Ok(VideoMetadata::default()),
        LoadedMetadata::Parsed(meta) => Ok(meta),
        LoadedMetadata::Malformed { reason } => Err(Error::MalformedMetadata {
            path: metadata_path(video_dir),
            reason,
        }),
    }
}

/// Persist `meta` in full as block-style YAML with sorted keys
pub fn save(video_dir: &Path, meta: &VideoMetadata) -> Result<PathBuf> {
    let path = metadata_path(video_dir);
    let yaml = serde_yaml::to_string(meta)?;
    fs::write(&path, yaml).map_err(|e| Error::write_failure(&path, e))?;
    Ok(path)
}

/// Shallow-merge `patch` into the metadata of `video_dir` and rewrite it
///
/// Creates the file when absent; `video_dir` itself must already exist.
/// Returns the merged record and the path written.
pub fn merge_into(video_dir: &Path, patch: VideoMetadata) -> Result<(VideoMetadata, PathBuf)> {
    let mut meta = load_or_empty(video_dir)?;
    meta.merge(patch);
    let path = save(video_dir, &meta)?;
    Ok((meta, path))
}
