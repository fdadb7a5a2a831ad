//! glbv-api library - scene and metadata Query Service
//!
//! Stateless: every request re-reads the filesystem. No cache, no index.

use axum::http::HeaderValue;
use axum::Router;
use glbv_common::config::ToolkitConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

pub mod api;
pub mod error;

pub use crate::error::{ApiError, ApiResult};

/// Directories the handlers read from
#[derive(Debug, Clone)]
pub struct ServingPaths {
    /// Root of the `<week>/<author>/<video>` asset tree
    pub data_root: PathBuf,
    /// Flat `<video>.glb` links
    pub scenes_dir: PathBuf,
    /// Flat `<video>.jpg` links
    pub frames_dir: PathBuf,
    /// Per-video `<video>/*.mp4` links
    pub poses_dir: PathBuf,
}

impl ServingPaths {
    pub fn from_config(config: &ToolkitConfig) -> Self {
        Self {
            data_root: config.data_root.clone(),
            scenes_dir: config.scenes_dir(),
            frames_dir: config.frames_dir(),
            poses_dir: config.poses_dir(),
        }
    }
}

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub paths: Arc<ServingPaths>,
    /// Origins allowed by the CORS layer
    pub cors_origins: Vec<String>,
}

impl AppState {
    pub fn new(paths: ServingPaths, cors_origins: Vec<String>) -> Self {
        Self {
            paths: Arc::new(paths),
            cors_origins,
        }
    }
}

/// Build application router
///
/// JSON API under `/api`, static passthrough for the three serving
/// directories, plus `/health`.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let cors = cors_layer(&state.cors_origins);
    let paths = state.paths.clone();

    let api = Router::new()
        .route("/api/hello", get(api::hello))
        .route("/api/scenes/data", get(api::list_scenes))
        .route("/api/reconstruction/scenario", get(api::get_scenario))
        .route("/api/video/metadata", post(api::update_video_metadata))
        .route("/api/videos/metadata", get(api::get_all_videos_metadata))
        .route("/api/poses/list", get(api::list_pose_mp4s))
        .merge(api::health_routes());

    Router::new()
        .merge(api)
        .nest_service("/scenes", ServeDir::new(&paths.scenes_dir))
        .nest_service("/frames", ServeDir::new(&paths.frames_dir))
        .nest_service("/poses", ServeDir::new(&paths.poses_dir))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// CORS restricted to the configured origins, any method and header
///
/// Methods and headers are mirrored rather than wildcarded because
/// credentials are allowed.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
