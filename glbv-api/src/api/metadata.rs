//! Video metadata endpoints
//!
//! Reads and patches `data/<week>/<author>/<video>/metadata.yaml`. There is
//! no concurrency control: two patches to the same video race and the last
//! write wins.

use axum::{extract::State, Json};
use glbv_common::layout;
use glbv_common::{metadata, Error as CommonError, VideoMetadata};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

use super::blocking;
use crate::{ApiError, ApiResult, AppState};

/// Request body for POST /api/video/metadata
#[derive(Debug, Deserialize)]
pub struct VideoMetadataUpdate {
    /// Leaf video folder name (e.g. `img_0003`)
    pub video: String,
    /// Must include `week` and `author`; merged over the stored mapping
    pub metadata: Map<String, Value>,
}

/// Response for POST /api/video/metadata
#[derive(Debug, Serialize)]
pub struct MetadataUpdated {
    pub message: String,
    pub path: String,
}

/// GET /api/videos/metadata
///
/// Maps every video name to its metadata. A missing or unreadable file
/// yields an empty mapping for that video; the rest are still returned.
pub async fn get_all_videos_metadata(
    State(state): State<AppState>,
) -> ApiResult<Json<BTreeMap<String, VideoMetadata>>> {
    let data_root = state.paths.data_root.clone();
    let all = blocking(move || collect_all_metadata(&data_root)).await?;
    Ok(Json(all))
}

/// POST /api/video/metadata
pub async fn update_video_metadata(
    State(state): State<AppState>,
    Json(request): Json<VideoMetadataUpdate>,
) -> ApiResult<Json<MetadataUpdated>> {
    let data_root = state.paths.data_root.clone();
    let updated = blocking(move || apply_update(&data_root, request)).await?;
    Ok(Json(updated))
}

fn collect_all_metadata(data_root: &Path) -> ApiResult<BTreeMap<String, VideoMetadata>> {
    let assets = match layout::walk_assets(data_root) {
        Ok(assets) => assets,
        Err(CommonError::RootMissing(_)) => return Ok(BTreeMap::new()),
        Err(e) => return Err(ApiError::Internal(format!("Error reading metadata: {}", e))),
    };

    let mut all = BTreeMap::new();
    for asset in assets {
        let meta = match metadata::load_or_empty(&asset.dir) {
            Ok(meta) => meta,
            Err(e) => {
                warn!("Error reading metadata for {}: {}", asset.name, e);
                VideoMetadata::default()
            }
        };
        all.insert(asset.name, meta);
    }
    Ok(all)
}

fn apply_update(data_root: &Path, request: VideoMetadataUpdate) -> ApiResult<MetadataUpdated> {
    let VideoMetadataUpdate { video, metadata: incoming } = request;

    let week = required_str(&incoming, "week");
    let author = required_str(&incoming, "author");
    let (Some(week), Some(author)) = (week, author) else {
        return Err(ApiError::BadRequest(
            "metadata.week and metadata.author are required".to_string(),
        ));
    };

    let video_dir = layout::existing_video_dir(data_root, week, author, &video)?;

    let patch = VideoMetadata::from_json_map(incoming)
        .map_err(|e| ApiError::BadRequest(format!("Invalid metadata: {}", e)))?;

    let (_, path) = metadata::merge_into(&video_dir, patch)
        .map_err(|e| ApiError::Internal(format!("Error updating metadata: {}", e)))?;

    info!("Metadata updated for {}", path.display());
    Ok(MetadataUpdated {
        message: format!("Metadata updated for video '{}'", video),
        path: path.display().to_string(),
    })
}

/// A non-empty string field, or `None`
fn required_str<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn request(body: Value) -> VideoMetadataUpdate {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_required_str() {
        let Value::Object(map) = json!({"week": "week1", "author": "", "n": 3}) else {
            unreachable!()
        };
        assert_eq!(required_str(&map, "week"), Some("week1"));
        assert_eq!(required_str(&map, "author"), None);
        assert_eq!(required_str(&map, "n"), None);
        assert_eq!(required_str(&map, "missing"), None);
    }

    #[test]
    fn test_apply_update_rejects_traversal() {
        let tmp = TempDir::new().unwrap();
        let err = apply_update(
            tmp.path(),
            request(json!({"video": "..", "metadata": {"week": "w", "author": "a"}})),
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::Common(CommonError::ValidationFailure(_))));
    }

    #[test]
    fn test_collect_skips_malformed_file() {
        let tmp = TempDir::new().unwrap();
        let good = tmp.path().join("week1/alice/vid001");
        let bad = tmp.path().join("week1/alice/vid002");
        fs::create_dir_all(&good).unwrap();
        fs::create_dir_all(&bad).unwrap();
        fs::write(good.join("metadata.yaml"), "status: pending\n").unwrap();
        fs::write(bad.join("metadata.yaml"), "- not a mapping\n").unwrap();

        let all = collect_all_metadata(tmp.path()).unwrap();
        assert_eq!(all.len(), 2);
        assert!(all["vid001"].status.is_some());
        assert!(all["vid002"].is_empty());
    }
}
