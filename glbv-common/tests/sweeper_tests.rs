//! Integration tests for the lifecycle sweeper on a legacy flat layout

use glbv_common::sweeper::{sweep, sweep_with, SweepAction};
use glbv_common::Error;
use std::fs;
use std::io;
use tempfile::TempDir;

#[test]
fn test_mixed_case_delete_is_swept() {
    let tmp = TempDir::new().unwrap();
    let videos = tmp.path().join("videos");
    let doomed = videos.join("vid001");
    fs::create_dir_all(doomed.join("reconstruction/objects")).unwrap();
    fs::write(doomed.join("reconstruction/objects/cup.mp4"), b"x").unwrap();
    fs::write(doomed.join("metadata.yaml"), "author: alice\nstatus: DELETE\n").unwrap();

    let summary = sweep(&videos).unwrap();

    assert!(!doomed.exists());
    assert_eq!(summary.deleted(), 1);
    assert_eq!(summary.entries[0].action, SweepAction::Deleted);
}

#[test]
fn test_unparsable_metadata_is_skipped_not_fatal() {
    let tmp = TempDir::new().unwrap();
    let broken = tmp.path().join("broken");
    let fine = tmp.path().join("fine");
    fs::create_dir_all(&broken).unwrap();
    fs::create_dir_all(&fine).unwrap();
    fs::write(broken.join("metadata.yaml"), "status: [delete\n").unwrap();
    fs::write(fine.join("metadata.yaml"), "status: delete\n").unwrap();

    let summary = sweep(tmp.path()).unwrap();

    assert!(broken.exists());
    assert!(!fine.exists());
    assert_eq!(summary.skipped(), 1);
    assert_eq!(summary.deleted(), 1);
    assert!(summary.is_success());
}

#[test]
fn test_failed_deletion_is_counted_and_sweep_continues() {
    let tmp = TempDir::new().unwrap();
    for name in ["a", "b", "c"] {
        let dir = tmp.path().join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("metadata.yaml"), "status: delete\n").unwrap();
    }

    let summary = sweep_with(tmp.path(), |dir| {
        if dir.ends_with("b") {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only mount"))
        } else {
            fs::remove_dir_all(dir)
        }
    })
    .unwrap();

    assert!(!tmp.path().join("a").exists());
    assert!(tmp.path().join("b").exists());
    assert!(!tmp.path().join("c").exists());
    assert_eq!(summary.deleted(), 2);
    assert_eq!(summary.errors(), 1);
    assert!(!summary.is_success());
    assert_eq!(
        summary.entries[1].action,
        SweepAction::Failed("read-only mount".to_string())
    );
}

#[test]
fn test_empty_metadata_file_is_reported_as_missing() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("vid001");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("metadata.yaml"), "").unwrap();

    let summary = sweep(tmp.path()).unwrap();

    assert!(dir.exists());
    assert_eq!(
        summary.entries[0].action,
        SweepAction::Skipped(Some("No metadata".to_string()))
    );
}

#[test]
fn test_empty_root() {
    let tmp = TempDir::new().unwrap();
    let summary = sweep(tmp.path()).unwrap();
    assert!(summary.entries.is_empty());
}

#[test]
fn test_missing_root_is_fatal() {
    let tmp = TempDir::new().unwrap();
    assert!(matches!(
        sweep(&tmp.path().join("videos")).unwrap_err(),
        Error::RootMissing(_)
    ));
}
