//! Asset directory convention and tree walkers
//!
//! Assets live at `<data_root>/<week>/<author>/<video>/`:
//!
//! ```text
//! <video>/
//!   metadata.yaml
//!   images/frame_00000.jpg
//!   reconstruction/scenario/scene_optimized.glb
//!   reconstruction/objects/*.mp4
//! ```
//!
//! The legacy layout used by the sweeper is flat: `<videos_root>/<video>/`.

use std::path::{Component, Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

use crate::{Error, Result};

/// File name of the per-video metadata sidecar
pub const METADATA_FILE: &str = "metadata.yaml";

/// Scene artifact, relative to a video directory
pub const SCENE_RELATIVE: &str = "reconstruction/scenario/scene_optimized.glb";

/// Representative thumbnail, relative to a video directory
pub const FRAME_RELATIVE: &str = "images/frame_00000.jpg";

/// Directory of per-object pose videos, relative to a video directory
pub const OBJECTS_RELATIVE: &str = "reconstruction/objects";

/// One processed video, identified by `(week, author, name)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoAsset {
    pub week: String,
    pub author: String,
    pub name: String,
    /// Absolute or root-relative path of the video directory
    pub dir: PathBuf,
}

impl VideoAsset {
    pub fn metadata_path(&self) -> PathBuf {
        self.dir.join(METADATA_FILE)
    }

    pub fn scene_source(&self) -> PathBuf {
        self.dir.join(SCENE_RELATIVE)
    }

    pub fn frame_source(&self) -> PathBuf {
        self.dir.join(FRAME_RELATIVE)
    }

    pub fn objects_dir(&self) -> PathBuf {
        self.dir.join(OBJECTS_RELATIVE)
    }
}

/// Directory of one video inside the three-level tree
pub fn video_dir(data_root: &Path, week: &str, author: &str, video: &str) -> PathBuf {
    data_root.join(week).join(author).join(video)
}

/// Directory of one video that must already exist
///
/// Every segment is validated first so the result stays under `data_root`.
pub fn existing_video_dir(
    data_root: &Path,
    week: &str,
    author: &str,
    video: &str,
) -> Result<PathBuf> {
    validate_segment("video", video)?;
    validate_segment("metadata.week", week)?;
    validate_segment("metadata.author", author)?;

    let dir = video_dir(data_root, week, author, video);
    if dir.is_dir() {
        Ok(dir)
    } else {
        Err(Error::NotFound(format!("video directory {}", dir.display())))
    }
}

/// Walk `<data_root>/<week>/<author>/<video>` and collect every video directory
///
/// Entries are visited in file-name order at every level. Non-directories are
/// ignored at every level. Unreadable subdirectories are logged and skipped;
/// only a missing `data_root` is an error.
pub fn walk_assets(data_root: &Path) -> Result<Vec<VideoAsset>> {
    ensure_root(data_root)?;

    let mut assets = Vec::new();
    let walker = WalkDir::new(data_root)
        .min_depth(3)
        .max_depth(3)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", data_root.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_dir() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(data_root) else {
            continue;
        };
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        if let [week, author, name] = parts.as_slice() {
            assets.push(VideoAsset {
                week: week.clone(),
                author: author.clone(),
                name: name.clone(),
                dir: entry.path().to_path_buf(),
            });
        }
    }

    Ok(assets)
}

/// List the immediate subdirectories of `root`, sorted by name
///
/// Used for the legacy flat video layout and for author output trees.
pub fn walk_flat(root: &Path) -> Result<Vec<PathBuf>> {
    ensure_root(root)?;

    let mut dirs = Vec::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        match entry {
            Ok(entry) if entry.file_type().is_dir() => dirs.push(entry.into_path()),
            Ok(_) => {}
            Err(e) => warn!("Skipping unreadable entry under {}: {}", root.display(), e),
        }
    }

    Ok(dirs)
}

fn ensure_root(root: &Path) -> Result<()> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(Error::RootMissing(root.to_path_buf()))
    }
}

/// Check that `value` is usable as a single directory or file name
///
/// Rejects empty strings, separators, `.` and `..` so caller-supplied names
/// can never escape the directory they are joined onto.
pub fn validate_segment(field: &str, value: &str) -> Result<()> {
    let mut components = Path::new(value).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(c)), None) if c == value
    );

    if value.is_empty() || !single_normal || value.contains(['/', '\\']) {
        return Err(Error::ValidationFailure(format!(
            "{} must be a single path segment, got {:?}",
            field, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_walk_assets_three_levels_sorted() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("week2/bob/vid003")).unwrap();
        fs::create_dir_all(root.join("week1/alice/vid002")).unwrap();
        fs::create_dir_all(root.join("week1/alice/vid001")).unwrap();
        // Stray files at every level are ignored
        fs::write(root.join("README.txt"), "x").unwrap();
        fs::write(root.join("week1/notes.txt"), "x").unwrap();
        fs::write(root.join("week1/alice/loose.mp4"), "x").unwrap();

        let assets = walk_assets(root).unwrap();
        let names: Vec<&str> = assets.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["vid001", "vid002", "vid003"]);

        assert_eq!(assets[0].week, "week1");
        assert_eq!(assets[0].author, "alice");
        assert_eq!(assets[2].week, "week2");
        assert_eq!(assets[2].author, "bob");
        assert_eq!(assets[0].dir, root.join("week1/alice/vid001"));
    }

    #[test]
    fn test_walk_assets_empty_root() {
        let tmp = TempDir::new().unwrap();
        assert!(walk_assets(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn test_walk_assets_missing_root() {
        let tmp = TempDir::new().unwrap();
        let err = walk_assets(&tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, Error::RootMissing(_)));
    }

    #[test]
    fn test_walk_flat_lists_only_directories() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("b")).unwrap();
        fs::create_dir(tmp.path().join("a")).unwrap();
        fs::write(tmp.path().join("c.txt"), "x").unwrap();

        let dirs = walk_flat(tmp.path()).unwrap();
        assert_eq!(dirs, vec![tmp.path().join("a"), tmp.path().join("b")]);
    }

    #[test]
    fn test_asset_artifact_paths() {
        let asset = VideoAsset {
            week: "week1".into(),
            author: "alice".into(),
            name: "vid001".into(),
            dir: PathBuf::from("/d/week1/alice/vid001"),
        };
        assert_eq!(
            asset.scene_source(),
            PathBuf::from("/d/week1/alice/vid001/reconstruction/scenario/scene_optimized.glb")
        );
        assert_eq!(
            asset.frame_source(),
            PathBuf::from("/d/week1/alice/vid001/images/frame_00000.jpg")
        );
        assert_eq!(
            asset.objects_dir(),
            PathBuf::from("/d/week1/alice/vid001/reconstruction/objects")
        );
        assert_eq!(
            asset.metadata_path(),
            PathBuf::from("/d/week1/alice/vid001/metadata.yaml")
        );
    }

    #[test]
    fn test_existing_video_dir() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("week1/alice/vid001")).unwrap();

        assert_eq!(
            existing_video_dir(tmp.path(), "week1", "alice", "vid001").unwrap(),
            tmp.path().join("week1/alice/vid001")
        );
        assert!(matches!(
            existing_video_dir(tmp.path(), "week1", "alice", "vid002").unwrap_err(),
            Error::NotFound(_)
        ));
        assert!(matches!(
            existing_video_dir(tmp.path(), "..", "alice", "vid001").unwrap_err(),
            Error::ValidationFailure(_)
        ));
    }

    #[test]
    fn test_validate_segment() {
        assert!(validate_segment("video", "vid001").is_ok());
        assert!(validate_segment("video", "img_0003.v2").is_ok());
        assert!(validate_segment("video", "").is_err());
        assert!(validate_segment("video", ".").is_err());
        assert!(validate_segment("video", "..").is_err());
        assert!(validate_segment("video", "a/b").is_err());
        assert!(validate_segment("video", "/abs").is_err());
        assert!(validate_segment("video", "a\\b").is_err());
    }
}
