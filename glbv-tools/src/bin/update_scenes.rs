//! Scene projection
//!
//! Links `reconstruction/scenario/scene_optimized.glb` of every video into
//! `<serving_root>/scenes/<video>.glb`.
//!
//! **Usage:**
//! ```bash
//! update-scenes [--data-root <DIR>] [--serving-root <DIR>]
//! ```

use clap::Parser;
use glbv_common::ArtifactKind;
use glbv_tools::cli::{run_projection, ConfigArgs};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "update-scenes")]
#[command(about = "Refresh scene symlinks in the serving directory")]
#[command(version)]
struct Args {
    #[command(flatten)]
    config: ConfigArgs,
}

fn main() -> ExitCode {
    let args = Args::parse();
    run_projection(&args.config, ArtifactKind::Scene)
}
