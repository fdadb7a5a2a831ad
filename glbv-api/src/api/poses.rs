//! Pose video listing

use axum::{
    extract::{Query, State},
    Json,
};
use glbv_common::layout::validate_segment;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::blocking;
use crate::{ApiError, ApiResult, AppState};

/// Query parameters for GET /api/poses/list
#[derive(Debug, Deserialize)]
pub struct PoseQuery {
    pub video: String,
}

/// Response for GET /api/poses/list
#[derive(Debug, Serialize)]
pub struct PoseFiles {
    pub mp4s: Vec<String>,
}

/// GET /api/poses/list?video=<video>
///
/// Sorted `.mp4` file names (extension matched case-insensitively) in the
/// video's pose directory, served statically at `/poses/<video>/<file>`.
pub async fn list_pose_mp4s(
    State(state): State<AppState>,
    Query(query): Query<PoseQuery>,
) -> ApiResult<Json<PoseFiles>> {
    validate_segment("video", &query.video)?;

    let pose_dir = state.paths.poses_dir.join(&query.video);
    let mp4s = blocking(move || scan_pose_files(&pose_dir)).await?;
    Ok(Json(PoseFiles { mp4s }))
}

fn scan_pose_files(pose_dir: &Path) -> ApiResult<Vec<String>> {
    if !pose_dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(pose_dir)
        .map_err(|e| ApiError::Internal(format!("Error listing pose mp4s: {}", e)))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| ApiError::Internal(format!("Error listing pose mp4s: {}", e)))?;
        let path = entry.path();
        let is_file = fs::metadata(&path).map(|m| m.is_file()).unwrap_or(false);
        let is_mp4 = path
            .extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case("mp4"));
        if is_file && is_mp4 {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_scan_pose_files_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("b.mp4"), b"x").unwrap();
        fs::write(tmp.path().join("A.MP4"), b"x").unwrap();
        fs::write(tmp.path().join("c.mov"), b"x").unwrap();

        assert_eq!(scan_pose_files(tmp.path()).unwrap(), vec!["A.MP4", "b.mp4"]);
    }

    #[test]
    fn test_scan_pose_files_missing_dir() {
        let tmp = TempDir::new().unwrap();
        assert!(scan_pose_files(&tmp.path().join("vid001")).unwrap().is_empty());
    }
}
