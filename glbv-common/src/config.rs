//! Configuration loading and config file resolution
//!
//! Every root the toolkit touches is injected from here. Binaries resolve a
//! [`ToolkitConfig`] once at startup and then apply their own CLI/env
//! overrides on top; nothing is derived from the executable's location.
//!
//! Config file priority order:
//! 1. Command-line argument (highest priority)
//! 2. `GLBV_CONFIG` environment variable
//! 3. User config file (`~/.config/glb-visualizer/config.toml` on Linux)
//! 4. System config file (`/etc/glb-visualizer/config.toml`, Linux only)
//! 5. Compiled defaults (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "GLBV_CONFIG";

const APP_DIR: &str = "glb-visualizer";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Top-level configuration shared by the API and the tools
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ToolkitConfig {
    /// Root of the `<week>/<author>/<video>` asset tree
    pub data_root: PathBuf,

    /// Root of the legacy flat `<video>` tree used by the sweeper
    pub videos_root: PathBuf,

    /// Directory holding the `scenes/`, `frames/` and `poses/` serving dirs
    pub serving_root: PathBuf,

    /// Base directory holding one `<author>/outputs/` tree per author
    pub authors_root: PathBuf,

    /// HTTP server settings
    pub server: ServerConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server settings for the Query Service
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by the CORS layer
    pub cors_origins: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("/data2/openreal2sim/reconstructions/data"),
            videos_root: PathBuf::from("/data2/openreal2sim/outputs/videos"),
            serving_root: PathBuf::from("backend"),
            authors_root: PathBuf::from("/data2/openreal2sim"),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            cors_origins: vec![
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ToolkitConfig {
    /// Parse a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load a config file from an explicit path
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Cannot read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Resolve and load the config following the priority order above
    ///
    /// A missing file is not an error: a warning is logged and compiled
    /// defaults are used. A file that exists but fails to parse is an error.
    pub fn load(cli_arg: Option<&Path>) -> Result<Self> {
        match resolve_config_path(cli_arg) {
            Some(path) if path.exists() => {
                info!("Loading configuration from {}", path.display());
                Self::from_file(&path)
            }
            Some(path) => {
                warn!(
                    "Config file {} not found, using compiled defaults",
                    path.display()
                );
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Flat directory of `<video>.glb` scene links
    pub fn scenes_dir(&self) -> PathBuf {
        self.serving_root.join("scenes")
    }

    /// Flat directory of `<video>.jpg` thumbnail links
    pub fn frames_dir(&self) -> PathBuf {
        self.serving_root.join("frames")
    }

    /// Directory of per-video `<video>/*.mp4` pose links
    pub fn poses_dir(&self) -> PathBuf {
        self.serving_root.join("poses")
    }
}

/// Pick the config file to read, if any
///
/// Explicit sources (CLI, env) are returned even if the file does not exist
/// so the caller can warn about it. Implicit locations are only returned
/// when present.
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    // Priority 3: User config file
    let user_config = dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE_NAME));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    // Priority 4: System config file
    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc").join(APP_DIR).join(CONFIG_FILE_NAME);
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}
