//! Pending-status seeding
//!
//! Adds `status: pending` to every existing `metadata.yaml` under the data
//! root that has no status yet. Files are never created.
//!
//! **Usage:**
//! ```bash
//! add-pending-status [--data-root <DIR>]
//! ```

use clap::Parser;
use glbv_tools::cli::{exit_code, ConfigArgs};
use glbv_tools::{report, seeding};
use std::process::ExitCode;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "add-pending-status")]
#[command(about = "Seed status: pending into existing video metadata")]
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

    info!("Seeding pending status under {}", config.data_root.display());
    match seeding::run(&config.data_root) {
        Ok(pass) => {
            print!("{}", report::seeding(&pass));
            exit_code(pass.errors() == 0)
        }
        Err(e) => {
            println!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
