// tests/config_test.rs
use release_publish::config::{load_config, Config, RunOptions, DEBUG_ENV, DRY_RUN_ENV};
use release_publish::runner::WriteMode;
use serial_test::serial;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.remote, "origin");
    assert_eq!(config.sentinel_tag, "latest");
    assert_eq!(config.branches.main, "main");
    assert_eq!(config.branches.release_prefix, "release/");
    assert_eq!(config.branches.allowed, vec!["feature/docusaurus".to_string()]);
    assert_eq!(config.workflows.dir, PathBuf::from(".github/workflows"));
    assert_eq!(config.workflows.action, "infinum/js-pipeline");
    assert_eq!(config.manifest.path, PathBuf::from("package.json"));
    assert_eq!(
        config.docs.command,
        vec!["npm", "run", "docusaurus", "docs:version"]
    );
}

#[test]
fn test_load_from_file() {
    let config = load_config(
        Some(Path::new("tests/fixtures/custom_publish.toml")),
        Path::new("."),
    )
    .expect("Failed to load test config");

    assert_eq!(config.remote, "upstream");
    assert_eq!(config.sentinel_tag, "stable");
    assert_eq!(config.branches.main, "trunk");
    // Unset keys keep their defaults
    assert_eq!(config.branches.release_prefix, "release/");
    assert_eq!(config.workflows.action, "acme/shared-pipeline");
    assert_eq!(config.manifest.path, PathBuf::from("app/package.json"));
    assert_eq!(config.docs.command, vec!["./scripts/version-docs.sh"]);
}

#[test]
fn test_partial_file_uses_defaults() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"remote = \"fork\"\n").unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path()), Path::new(".")).unwrap();
    assert_eq!(config.remote, "fork");
    assert_eq!(config.sentinel_tag, "latest");
    assert_eq!(config.workflows.action, "infinum/js-pipeline");
}

#[test]
fn test_config_in_work_dir() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("publish.toml"), "sentinel_tag = \"current\"\n").unwrap();

    let config = load_config(None, dir.path()).unwrap();
    assert_eq!(config.sentinel_tag, "current");
}

#[test]
fn test_invalid_toml_is_config_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"remote = [unterminated").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path()), Path::new(".")).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
fn test_empty_docs_command_rejected() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[docs]\ncommand = []\n").unwrap();
    temp_file.flush().unwrap();

    assert!(load_config(Some(temp_file.path()), Path::new(".")).is_err());
}

#[test]
#[serial]
fn test_run_options_from_env() {
    std::env::set_var(DEBUG_ENV, "true");
    std::env::set_var(DRY_RUN_ENV, "true");
    let opts = RunOptions::from_env();
    assert!(opts.debug);
    assert_eq!(opts.write_mode, WriteMode::Simulate);

    std::env::set_var(DEBUG_ENV, "false");
    std::env::remove_var(DRY_RUN_ENV);
    let opts = RunOptions::from_env();
    assert!(!opts.debug);
    assert_eq!(opts.write_mode, WriteMode::Apply);

    std::env::remove_var(DEBUG_ENV);
}

#[test]
#[serial]
fn test_cli_flags_enable_simulation() {
    std::env::remove_var(DRY_RUN_ENV);
    std::env::remove_var(DEBUG_ENV);

    let opts = RunOptions::from_env().with_flags(false, true);
    assert_eq!(opts.write_mode, WriteMode::Simulate);
    assert!(!opts.debug);
}
