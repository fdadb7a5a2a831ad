//! Author tagging
//!
//! Sets `author` in the metadata of every directory under
//! `<authors_root>/<author>/outputs/`, creating `metadata.yaml` where absent.
//!
//! **Usage:**
//! ```bash
//! tag-author --author <NAME|INDEX> [--authors-root <DIR>]
//! ```
//!
//! Without `--author` the candidate authors are listed and nothing is written.

use clap::Parser;
use glbv_tools::authors::{list_authors, resolve_author_choice, tag_outputs};
use glbv_tools::cli::{exit_code, ConfigArgs};
use glbv_tools::report;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "tag-author")]
#[command(about = "Tag every output directory of an author with author metadata")]
#[command(version)]
struct Args {
    /// Author directory name, or its 1-based index in the listing
    #[arg(short, long)]
    author: Option<String>,

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

    let authors = match list_authors(&config.authors_root) {
        Ok(authors) => authors,
        Err(e) => {
            println!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let Some(choice) = args.author else {
        println!("Available authors in {}:", config.authors_root.display());
        for (i, author) in authors.iter().enumerate() {
            println!("  {}. {}", i + 1, author);
        }
        println!("\nRe-run with --author <NAME|INDEX>");
        return ExitCode::FAILURE;
    };

    let Some(author) = resolve_author_choice(&choice, &authors) else {
        println!("Error: unknown author '{}'", choice);
        return ExitCode::FAILURE;
    };

    match tag_outputs(&config.authors_root, &author) {
        Ok(summary) => {
            print!("{}", report::tagging(&summary));
            exit_code(summary.failed() == 0)
        }
        Err(e) => {
            println!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
