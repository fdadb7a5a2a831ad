//! Scene listing and GLB download
//!
//! Reads the flat scene serving directory populated by `update-scenes`.

use axum::{
    body::Body,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use glbv_common::layout::validate_segment;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tokio_util::io::ReaderStream;

use super::blocking;
use crate::{ApiError, ApiResult, AppState};

const SCENE_EXTENSION: &str = "glb";
const GLB_MEDIA_TYPE: &str = "model/gltf-binary";

/// Response for GET /api/scenes/data
#[derive(Debug, Serialize)]
pub struct SceneKeys {
    pub keys: Vec<String>,
}

/// Query parameters for GET /api/reconstruction/scenario
#[derive(Debug, Deserialize)]
pub struct SceneQuery {
    pub key: String,
}

/// GET /api/scenes/data
///
/// Sorted scene keys (file names without `.glb`). An absent directory is an
/// empty list.
pub async fn list_scenes(State(state): State<AppState>) -> ApiResult<Json<SceneKeys>> {
    let scenes_dir = state.paths.scenes_dir.clone();
    let keys = blocking(move || scan_scene_keys(&scenes_dir)).await?;
    Ok(Json(SceneKeys { keys }))
}

/// GET /api/reconstruction/scenario?key=<video>
///
/// Streams `<scenes_dir>/<key>.glb`.
pub async fn get_scenario(
    State(state): State<AppState>,
    Query(query): Query<SceneQuery>,
) -> ApiResult<Response> {
    validate_segment("key", &query.key)?;

    let file_name = format!("{}.{}", query.key, SCENE_EXTENSION);
    let path = state.paths.scenes_dir.join(&file_name);

    let file = match tokio::fs::File::open(&path).await {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ApiError::NotFound(format!(
                "Scene not found for key: {}",
                query.key
            )))
        }
        Err(e) => return Err(ApiError::Io(e)),
    };

    let body = Body::from_stream(ReaderStream::new(file));
    let headers = [
        (header::CONTENT_TYPE, GLB_MEDIA_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name),
        ),
    ];
    Ok((headers, body).into_response())
}

fn scan_scene_keys(scenes_dir: &Path) -> ApiResult<Vec<String>> {
    if !scenes_dir.exists() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(scenes_dir).map_err(|e| {
        ApiError::Internal(format!("Error scanning scenes directory: {}", e))
    })?;

    let mut keys = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            ApiError::Internal(format!("Error scanning scenes directory: {}", e))
        })?;
        let path = entry.path();
        // Follows the link; dangling links are not listed
        let is_file = fs::metadata(&path).map(|m| m.is_file()).unwrap_or(false);
        if !is_file || path.extension().map_or(true, |ext| ext != SCENE_EXTENSION) {
            continue;
        }
        if let Some(stem) = path.file_stem() {
            keys.push(stem.to_string_lossy().into_owned());
        }
    }

    keys.sort();
    Ok(keys)
}
