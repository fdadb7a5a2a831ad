//! Lifecycle sweeper
//!
//! Permanently removes every video directory under the videos root whose
//! metadata says `status: delete` (any case). There is no dry run.
//!
//! **Usage:**
//! ```bash
//! delete-from-metadata [--videos-root <DIR>]
//! ```

use clap::Parser;
use glbv_common::sweeper;
use glbv_tools::cli::{exit_code, ConfigArgs};
use glbv_tools::report;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "delete-from-metadata")]
#[command(about = "Delete video directories whose metadata status is delete")]
#[command(version)]
struct Args {
    #[command(flatten)]
    config: ConfigArgs,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = match args.config.init() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Sweeping {}", config.videos_root.display());
    match sweeper::sweep(&config.videos_root) {
        Ok(summary) => {
            print!("{}", report::sweep(&summary));
            exit_code(summary.is_success())
        }
        Err(e) => {
            println!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
