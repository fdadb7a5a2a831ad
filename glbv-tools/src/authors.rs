//! Author tagging over `<authors_root>/<author>/outputs/<video>/`
//!
//! Tagging initializes metadata: the file is created when absent.

use glbv_common::layout::{validate_segment, walk_flat};
use glbv_common::{metadata, Error, VideoMetadata};
use std::path::{Path, PathBuf};

/// Directories under the authors root that are never authors
const NOT_AUTHORS: [&str; 2] = ["outputs", "node_modules"];

/// One tagged directory and whether its metadata was written
#[derive(Debug)]
pub struct TagResult {
    pub name: String,
    pub outcome: Result<PathBuf, Error>,
}

/// Result of tagging every output directory of one author
#[derive(Debug, Default)]
pub struct TagSummary {
    pub author: String,
    pub outputs_dir: PathBuf,
    pub results: Vec<TagResult>,
}

impl TagSummary {
    pub fn successful(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.successful()
    }
}

/// Candidate author directory names, sorted
pub fn list_authors(authors_root: &Path) -> glbv_common::Result<Vec<String>> {
    Ok(walk_flat(authors_root)?
        .iter()
        .filter_map(|dir| dir.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !NOT_AUTHORS.contains(&name.as_str()))
        .collect())
}

/// Interpret a choice as a 1-based index into `authors` or as a name
pub fn resolve_author_choice(choice: &str, authors: &[String]) -> Option<String> {
    let choice = choice.trim();
    if !choice.is_empty() && choice.chars().all(|c| c.is_ascii_digit()) {
        let index: usize = choice.parse().ok()?;
        return index.checked_sub(1).and_then(|i| authors.get(i)).cloned();
    }
    authors.iter().find(|a| a.as_str() == choice).cloned()
}

/// Directory holding one author's video outputs
pub fn outputs_dir(authors_root: &Path, author: &str) -> PathBuf {
    authors_root.join(author).join("outputs")
}

/// Set `author` in the metadata of every directory under the author's outputs
///
/// A missing outputs directory aborts; per-directory failures are recorded.
pub fn tag_outputs(authors_root: &Path, author: &str) -> glbv_common::Result<TagSummary> {
    validate_segment("author", author)?;

    let outputs_dir = outputs_dir(authors_root, author);
    let mut summary = TagSummary {
        author: author.to_string(),
        outputs_dir: outputs_dir.clone(),
        results: Vec::new(),
    };

    for dir in walk_flat(&outputs_dir)? {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let patch = VideoMetadata {
            author: Some(author.to_string()),
            ..VideoMetadata::default()
        };
        let outcome = metadata::merge_into(&dir, patch).map(|(_, path)| path);
        if let Err(e) = &outcome {
            tracing::warn!("Error processing {}: {}", dir.display(), e);
        }
        summary.results.push(TagResult { name, outcome });
    }

    Ok(summary)
}
