//! Frame thumbnail projection
//!
//! Links `images/frame_00000.jpg` of every video into
//! `<serving_root>/frames/<video>.jpg`.

use clap::Parser;
use glbv_common::ArtifactKind;
use glbv_tools::cli::{run_projection, ConfigArgs};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "update-frames")]
#[command(about = "Refresh frame thumbnail symlinks in the serving directory")]
#[command(version)]
struct Args {
    #[command(flatten)]
    config: ConfigArgs,
}

fn main() -> ExitCode {
    let args = Args::parse();
    run_projection(&args.config, ArtifactKind::Frame)
}
