//! Command-line plumbing shared by every tool

use clap::Args;
use glbv_common::config::ToolkitConfig;
use glbv_common::projection::{materialize, ArtifactKind};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::report;

/// Config file and root overrides accepted by every tool
///
/// All flags are optional; with none given the config file (or compiled
/// defaults) decides every root.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to a TOML config file
    #[arg(short, long, env = "GLBV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Root of the <week>/<author>/<video> asset tree
    #[arg(long, env = "GLBV_DATA_ROOT")]
    pub data_root: Option<PathBuf>,

    /// Root of the legacy flat <video> tree
    #[arg(long, env = "GLBV_VIDEOS_ROOT")]
    pub videos_root: Option<PathBuf>,

    /// Directory holding scenes/, frames/ and poses/
    #[arg(long, env = "GLBV_SERVING_ROOT")]
    pub serving_root: Option<PathBuf>,

    /// Base directory holding <author>/outputs/
    #[arg(long, env = "GLBV_AUTHORS_ROOT")]
    pub authors_root: Option<PathBuf>,
}

impl ConfigArgs {
    /// Load the config file and apply the root overrides
    pub fn resolve(&self) -> glbv_common::Result<ToolkitConfig> {
        let mut config = ToolkitConfig::load(self.config.as_deref())?;
        self.apply(&mut config);
        Ok(config)
    }

    fn apply(&self, config: &mut ToolkitConfig) {
        if let Some(path) = &self.data_root {
            config.data_root = path.clone();
        }
        if let Some(path) = &self.videos_root {
            config.videos_root = path.clone();
        }
        if let Some(path) = &self.serving_root {
            config.serving_root = path.clone();
        }
        if let Some(path) = &self.authors_root {
            config.authors_root = path.clone();
        }
    }

    /// Start logging, then resolve the config and apply its log level
    ///
    /// Logging comes first so a missing or mistyped config file is reported
    /// before any root from the compiled defaults is acted on.
    pub fn init(&self) -> anyhow::Result<ToolkitConfig> {
        let log = glbv_common::logging::init();
        let config = self.resolve()?;
        log.apply_level(&config.logging.level);
        Ok(config)
    }
}

/// Exit status for a finished walk
pub fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Body shared by `update-scenes`, `update-frames` and `update-poses`
pub fn run_projection(args: &ConfigArgs, kind: ArtifactKind) -> ExitCode {
    let config = match args.init() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let serving_dir = config.serving_root.join(kind.serving_subdir());
    tracing::info!(
        "Projecting {} from {} into {}",
        kind.serving_subdir(),
        config.data_root.display(),
        serving_dir.display()
    );

    match materialize(&config.data_root, &serving_dir, kind) {
        Ok(summary) => {
            print!("{}", report::projection(kind, &summary));
            exit_code(summary.is_success())
        }
        Err(e) => {
            println!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_config_roots() {
        let args = ConfigArgs {
            data_root: Some(PathBuf::from("/x/data")),
            serving_root: Some(PathBuf::from("/x/backend")),
            ..ConfigArgs::default()
        };
        let mut config = ToolkitConfig::default();
        args.apply(&mut config);

        assert_eq!(config.data_root, PathBuf::from("/x/data"));
        assert_eq!(config.scenes_dir(), PathBuf::from("/x/backend/scenes"));
        assert_eq!(config.videos_root, ToolkitConfig::default().videos_root);
    }
}
