//! Tests for configuration loading and config file resolution
//!
//! Uses serial_test to prevent ENV variable race conditions. Tests that
//! manipulate GLBV_CONFIG are marked with #[serial].

use glbv_common::config::{resolve_config_path, ToolkitConfig, CONFIG_ENV_VAR};
use glbv_common::Error;
use serial_test::serial;
use std::env;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
#[serial]
fn test_cli_argument_takes_precedence_over_env() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/glbv-from-env.toml");

    let cli = PathBuf::from("/tmp/glbv-from-cli.toml");
    assert_eq!(resolve_config_path(Some(&cli)), Some(cli.clone()));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_env_var_used_without_cli_argument() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/glbv-from-env.toml");

    assert_eq!(
        resolve_config_path(None),
        Some(PathBuf::from("/tmp/glbv-from-env.toml"))
    );

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_missing_explicit_file_falls_back_to_defaults() {
    env::remove_var(CONFIG_ENV_VAR);
    let tmp = TempDir::new().unwrap();

    let config = ToolkitConfig::load(Some(&tmp.path().join("absent.toml"))).unwrap();
    assert_eq!(config, ToolkitConfig::default());
}

#[test]
#[serial]
fn test_load_full_file() {
    env::remove_var(CONFIG_ENV_VAR);
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    fs::write(
        &path,
        r#"
data_root = "/srv/recon/data"
videos_root = "/srv/recon/videos"
serving_root = "/srv/recon/backend"
authors_root = "/srv/recon"

[server]
host = "0.0.0.0"
port = 8080
cors_origins = ["http://example.test"]

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let config = ToolkitConfig::load(Some(&path)).unwrap();
    assert_eq!(config.data_root, PathBuf::from("/srv/recon/data"));
    assert_eq!(config.videos_root, PathBuf::from("/srv/recon/videos"));
    assert_eq!(config.scenes_dir(), PathBuf::from("/srv/recon/backend/scenes"));
    assert_eq!(config.authors_root, PathBuf::from("/srv/recon"));
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.cors_origins, vec!["http://example.test"]);
    assert_eq!(config.logging.level, "debug");
}

#[test]
#[serial]
fn test_unparsable_file_is_error() {
    env::remove_var(CONFIG_ENV_VAR);
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    fs::write(&path, "port = \"not a number\"\n[server\n").unwrap();

    let err = ToolkitConfig::load(Some(&path)).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}
