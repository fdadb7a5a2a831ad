//! HTTP API handlers for glbv-api

pub mod health;
pub mod metadata;
pub mod poses;
pub mod scenes;

pub use health::{health_routes, hello};
pub use metadata::{get_all_videos_metadata, update_video_metadata};
pub use poses::list_pose_mp4s;
pub use scenes::{get_scenario, list_scenes};

use crate::ApiError;

/// Run blocking filesystem work off the async executor
pub(crate) async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("Worker task failed: {}", e)))?
}
