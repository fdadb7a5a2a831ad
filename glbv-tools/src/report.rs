//! Human-readable reports printed to stdout by the tools
//!
//! Formatting returns `String`s so the layout can be checked in tests.

use glbv_common::projection::{ArtifactKind, ProjectionSummary};
use glbv_common::sweeper::{SweepAction, SweepSummary};

use crate::authors::TagSummary;
use crate::seeding::SeedPass;

const SUMMARY_WIDTH: usize = 50;
const SWEEP_WIDTH: usize = 60;

fn rule(width: usize) -> String {
    "=".repeat(width)
}

/// Summary for one projection run
///
/// Scene runs list every skipped video name first.
pub fn projection(kind: ArtifactKind, summary: &ProjectionSummary) -> String {
    let mut out = String::new();

    if kind == ArtifactKind::Scene {
        for name in &summary.skipped {
            out.push_str(&format!("{}\n", name));
        }
    }
    for failure in &summary.errors {
        out.push_str(&format!(
            "[ERR]  {} {}: {}\n",
            failure.video,
            failure.path.display(),
            failure.message
        ));
    }

    out.push_str(&format!("\n{}\n", rule(SUMMARY_WIDTH)));
    match kind {
        ArtifactKind::Scene | ArtifactKind::Frame => {
            out.push_str(&format!("  Created: {}\n", summary.links_created));
            out.push_str(&format!("  Skipped: {}\n", summary.skipped.len()));
            out.push_str(&format!("  Errors:  {}\n", summary.errors.len()));
        }
        ArtifactKind::Pose => {
            out.push_str(&format!("  Videos processed: {}\n", summary.videos_processed));
            out.push_str(&format!("  Symlinks created: {}\n", summary.links_created));
            out.push_str(&format!("  Videos skipped (no mp4s): {}\n", summary.skipped.len()));
            out.push_str(&format!("  Errors:           {}\n", summary.errors.len()));
        }
    }
    out.push_str(&format!("{}\n", rule(SUMMARY_WIDTH)));
    out
}

/// Per-file lines and totals for a seeding pass
pub fn seeding(pass: &SeedPass) -> String {
    let mut out = String::new();
    for (path, reason) in &pass.results {
        let tag = if reason.changed() { "UPDATED" } else { "SKIPPED" };
        out.push_str(&format!("[{}] {} ({})\n", tag, path.display(), reason));
    }
    out.push_str(&format!(
        "Done. Examined: {}, Updated: {}, Skipped: {}\n",
        pass.examined(),
        pass.updated(),
        pass.skipped()
    ));
    out
}

/// Per-directory lines and totals for a sweep
pub fn sweep(summary: &SweepSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{}\n", rule(SWEEP_WIDTH)));
    out.push_str("Scanning for videos to delete...\n");
    out.push_str(&format!("{}\n\n", rule(SWEEP_WIDTH)));

    for entry in &summary.entries {
        match &entry.action {
            SweepAction::Deleted => {
                out.push_str(&format!("[DEL]  {:<50}\n", entry.name));
            }
            SweepAction::Skipped(Some(reason)) => {
                out.push_str(&format!("[SKIP] {:<50} ({})\n", entry.name, reason));
            }
            SweepAction::Skipped(None) => {}
            SweepAction::Failed(message) => {
                out.push_str(&format!("[ERR]  {:<50} {}\n", entry.name, message));
            }
        }
    }

    out.push_str(&format!("\n{}\n", rule(SWEEP_WIDTH)));
    out.push_str(&format!("  Deleted: {}\n", summary.deleted()));
    out.push_str(&format!("  Skipped: {}\n", summary.skipped()));
    out.push_str(&format!("  Errors:  {}\n", summary.errors()));
    out.push_str(&format!("{}\n\n", rule(SWEEP_WIDTH)));
    out
}

/// Per-directory lines and totals for author tagging
pub fn tagging(summary: &TagSummary) -> String {
    let mut out = String::new();
    let count = summary.results.len();
    out.push_str(&format!(
        "\nProcessing {} director{} for author: {}\n",
        count,
        if count == 1 { "y" } else { "ies" },
        summary.author
    ));
    out.push_str(&format!("Path: {}\n\n", summary.outputs_dir.display()));

    for result in &summary.results {
        match &result.outcome {
            Ok(_) => {
                out.push_str(&format!("Processing: {}... ok\n", result.name));
            }
            Err(e) => {
                out.push_str(&format!("Processing: {}... error: {}\n", result.name, e));
            }
        }
    }

    out.push_str(&format!("\n{}\n", rule(SUMMARY_WIDTH)));
    out.push_str("Summary:\n");
    out.push_str(&format!("  Successfully processed: {}\n", summary.successful()));
    if summary.failed() > 0 {
        out.push_str(&format!("  Failed: {}\n", summary.failed()));
    }
    out.push_str(&format!("{}\n", rule(SUMMARY_WIDTH)));
    out
}
