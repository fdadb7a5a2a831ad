//! Pose video projection
//!
//! Links every `reconstruction/objects/*.mp4` of a video into
//! `<serving_root>/poses/<video>/`.

use clap::Parser;
use glbv_common::ArtifactKind;
use glbv_tools::cli::{run_projection, ConfigArgs};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "update-poses")]
#[command(about = "Refresh pose video symlinks in the serving directory")]
#[command(version)]
struct Args {
    #[command(flatten)]
    config: ConfigArgs,
}

fn main() -> ExitCode {
    let args = Args::parse();
    run_projection(&args.config, ArtifactKind::Pose)
}
