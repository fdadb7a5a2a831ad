//! glbv-tools library - shared plumbing for the maintenance binaries
//!
//! Each binary is a single pass over a directory tree: it isolates failures
//! per item, prints a summary to stdout and exits 1 if any item failed.

pub mod authors;
pub mod cli;
pub mod report;
pub mod seeding;
