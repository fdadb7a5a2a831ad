//! Projection materializer
//!
//! Exposes artifacts from the nested asset tree as symlinks in flat serving
//! directories:
//!
//! | kind  | source (per video)                              | link                          |
//! |-------|-------------------------------------------------|-------------------------------|
//! | scene | `reconstruction/scenario/scene_optimized.glb`   | `scenes/<video>.glb`          |
//! | frame | `images/frame_00000.jpg`                        | `frames/<video>.jpg`          |
//! | pose  | `reconstruction/objects/*.mp4`                  | `poses/<video>/<file>.mp4`    |
//!
//! Every run unlinks and recreates the links it owns, so repeated runs
//! converge. Links whose source has since disappeared are left in place.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::layout::{walk_assets, VideoAsset};
use crate::{Error, Result};

/// Pose video extension, matched case-sensitively like a shell glob
const POSE_EXTENSION: &str = "mp4";

/// Which artifact a materializer run projects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Scene,
    Frame,
    Pose,
}

impl ArtifactKind {
    /// Name of the serving subdirectory for this kind
    pub fn serving_subdir(self) -> &'static str {
        match self {
            ArtifactKind::Scene => "scenes",
            ArtifactKind::Frame => "frames",
            ArtifactKind::Pose => "poses",
        }
    }

    /// Extension of the projected files
    pub fn extension(self) -> &'static str {
        match self {
            ArtifactKind::Scene => "glb",
            ArtifactKind::Frame => "jpg",
            ArtifactKind::Pose => POSE_EXTENSION,
        }
    }
}

/// Per-link failure recorded during a run
#[derive(Debug, Clone)]
pub struct LinkFailure {
    pub video: String,
    pub path: PathBuf,
    pub message: String,
}

/// Aggregate result of one materializer run
#[derive(Debug, Clone, Default)]
pub struct ProjectionSummary {
    /// Video directories visited
    pub videos_processed: usize,
    /// Symlinks (re)created
    pub links_created: usize,
    /// Videos whose source artifact was absent
    pub skipped: Vec<String>,
    /// Per-link failures; the walk continued past each of them
    pub errors: Vec<LinkFailure>,
}

impl ProjectionSummary {
    /// Skips alone are not failures
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    fn fail(&mut self, video: &str, path: &Path, err: impl std::fmt::Display) {
        warn!("Failed to link {} for {}: {}", path.display(), video, err);
        self.errors.push(LinkFailure {
            video: video.to_string(),
            path: path.to_path_buf(),
            message: err.to_string(),
        });
    }
}

/// Projects one artifact kind from `data_root` into `serving_dir`
#[derive(Debug, Clone)]
pub struct Materializer {
    data_root: PathBuf,
    serving_dir: PathBuf,
    kind: ArtifactKind,
}

impl Materializer {
    pub fn new(
        data_root: impl Into<PathBuf>,
        serving_dir: impl Into<PathBuf>,
        kind: ArtifactKind,
    ) -> Self {
        Self {
            data_root: data_root.into(),
            serving_dir: serving_dir.into(),
            kind,
        }
    }

    /// Walk every video and (re)create its links
    ///
    /// Fails only if the serving directory cannot be created or the data
    /// root is missing; everything else is recorded in the summary.
    pub fn run(&self) -> Result<ProjectionSummary> {
        fs::create_dir_all(&self.serving_dir)
            .map_err(|e| Error::write_failure(&self.serving_dir, e))?;

        let assets = walk_assets(&self.data_root)?;
        let mut summary = ProjectionSummary::default();

        for asset in &assets {
            summary.videos_processed += 1;
            match self.kind {
                ArtifactKind::Scene => {
                    self.project_single(asset, asset.scene_source(), &mut summary)
                }
                ArtifactKind::Frame => {
                    self.project_single(asset, asset.frame_source(), &mut summary)
                }
                ArtifactKind::Pose => self.project_poses(asset, &mut summary),
            }
        }

        debug!(
            "{} projection: {} videos, {} links, {} skipped, {} errors",
            self.kind.serving_subdir(),
            summary.videos_processed,
            summary.links_created,
            summary.skipped.len(),
            summary.errors.len()
        );
        Ok(summary)
    }

    fn project_single(&self, asset: &VideoAsset, source: PathBuf, summary: &mut ProjectionSummary) {
        if !source.exists() {
            summary.skipped.push(asset.name.clone());
            return;
        }

        let link = self
            .serving_dir
            .join(format!("{}.{}", asset.name, self.kind.extension()));
        match replace_symlink(&source, &link) {
            Ok(()) => summary.links_created += 1,
            Err(e) => summary.fail(&asset.name, &link, e),
        }
    }

    fn project_poses(&self, asset: &VideoAsset, summary: &mut ProjectionSummary) {
        let target_dir = self.serving_dir.join(&asset.name);
        if let Err(e) = fs::create_dir_all(&target_dir) {
            summary.fail(&asset.name, &target_dir, e);
            return;
        }

        let sources = pose_sources(&asset.objects_dir());
        if sources.is_empty() {
            summary.skipped.push(asset.name.clone());
            return;
        }

        for source in sources {
            let Some(file_name) = source.file_name() else {
                continue;
            };
            let link = target_dir.join(file_name);
            match replace_symlink(&source, &link) {
                Ok(()) => summary.links_created += 1,
                Err(e) => summary.fail(&asset.name, &link, e),
            }
        }
    }
}

/// Convenience wrapper for a single run
pub fn materialize(
    data_root: &Path,
    serving_dir: &Path,
    kind: ArtifactKind,
) -> Result<ProjectionSummary> {
    Materializer::new(data_root, serving_dir, kind).run()
}

/// `*.mp4` files directly inside `objects_dir`, sorted; empty if absent
fn pose_sources(objects_dir: &Path) -> Vec<PathBuf> {
    if !objects_dir.is_dir() {
        return Vec::new();
    }

    WalkDir::new(objects_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable pose entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == POSE_EXTENSION))
        .collect()
}

/// Point `link` at the resolved absolute path of `source`
///
/// Whatever already sits at `link` (file or symlink, dangling or not) is
/// removed first. Not atomic: a reader may briefly see no entry.
pub fn replace_symlink(source: &Path, link: &Path) -> io::Result<()> {
    let target = source.canonicalize()?;

    if fs::symlink_metadata(link).is_ok() {
        fs::remove_file(link)?;
    }

    create_symlink(&target, link)
}

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn video(root: &Path, rel: &str) -> PathBuf {
        let dir = root.join(rel);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"data").unwrap();
    }

    #[test]
    fn test_replace_symlink_overwrites_regular_file() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("src.glb");
        let link = tmp.path().join("link.glb");
        touch(&source);
        fs::write(&link, b"stale").unwrap();

        replace_symlink(&source, &link).unwrap();
        assert_eq!(fs::read_link(&link).unwrap(), source.canonicalize().unwrap());
    }

    #[test]
    fn test_replace_symlink_overwrites_dangling_link() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("src.glb");
        let link = tmp.path().join("link.glb");
        touch(&source);
        std::os::unix::fs::symlink(tmp.path().join("gone.glb"), &link).unwrap();

        replace_symlink(&source, &link).unwrap();
        assert_eq!(fs::read(&link).unwrap(), b"data");
    }

    #[test]
    fn test_pose_sources_filters_and_sorts() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("b.mp4"));
        touch(&tmp.path().join("a.mp4"));
        touch(&tmp.path().join("c.MP4"));
        touch(&tmp.path().join("notes.txt"));
        fs::create_dir(tmp.path().join("sub.mp4")).unwrap();

        let names: Vec<String> = pose_sources(tmp.path())
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.mp4", "b.mp4"]);
    }

    #[test]
    fn test_pose_dir_created_even_without_sources() {
        let tmp = TempDir::new().unwrap();
        let data = tmp.path().join("data");
        let poses = tmp.path().join("poses");
        video(&data, "week1/alice/vid001");

        let summary = materialize(&data, &poses, ArtifactKind::Pose).unwrap();
        assert_eq!(summary.videos_processed, 1);
        assert_eq!(summary.skipped, vec!["vid001"]);
        assert!(poses.join("vid001").is_dir());
    }

    #[test]
    fn test_missing_data_root_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let err = materialize(
            &tmp.path().join("data"),
            &tmp.path().join("scenes"),
            ArtifactKind::Scene,
        )
        .unwrap_err();
        assert!(matches!(err, Error::RootMissing(_)));
    }
}
