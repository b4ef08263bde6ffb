// crates/scholarship-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for argument parsing and offline config checks.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use clap::Parser;

use super::Cli;
use super::Commands;
use super::ConfigArgs;
use super::command_check_config;
use super::load_config;
use super::warn_network_exposure;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

const SCHEMA: &str = r#"{
    "generalInfo": [
        {"name": "fname", "type": "text", "label": "first name", "required": true},
        {"name": "lname", "type": "text", "label": "last name", "required": true},
        {"name": "email", "type": "email", "label": "email", "required": true}
    ],
    "fileInputs": [
        {"name": "resume", "label": "Resume"}
    ]
}"#;

/// Writes a config (plus schema) into `dir` and returns the config path.
fn write_config(dir: &Path, extra: &str) -> PathBuf {
    let schema_path = dir.join("form-schema.json");
    fs::write(&schema_path, SCHEMA).unwrap();
    let config_path = dir.join("scholarship-form.toml");
    let toml = format!(
        "{extra}\n[site]\nsupport_email = \"web@example.edu\"\n\n[schema]\npath = '{}'\n",
        schema_path.display()
    );
    fs::write(&config_path, toml).unwrap();
    config_path
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn parses_subcommands_with_config_paths() {
    let cli = Cli::try_parse_from(["scholarship-form", "serve", "--config", "form.toml"]).unwrap();
    match cli.command {
        Commands::Serve(args) => assert_eq!(args.config, Some(PathBuf::from("form.toml"))),
        other => panic!("unexpected command {other:?}"),
    }
    let cli = Cli::try_parse_from(["scholarship-form", "check-config"]).unwrap();
    assert!(matches!(cli.command, Commands::CheckConfig(ConfigArgs { config: None })));
    let cli = Cli::try_parse_from(["scholarship-form", "render-form"]).unwrap();
    assert!(matches!(cli.command, Commands::RenderForm(_)));
    assert!(Cli::try_parse_from(["scholarship-form"]).is_err());
    assert!(Cli::try_parse_from(["scholarship-form", "deploy"]).is_err());
}

#[test]
fn check_config_accepts_valid_files() {
    let dir = tempfile::tempdir().unwrap();
    let args = ConfigArgs { config: Some(write_config(dir.path(), "")) };
    assert!(command_check_config(&args).is_ok());
    assert!(!dir.path().join("scholarships.db").exists());
}

#[test]
fn check_config_reports_invalid_schema_fields() {
    let dir = tempfile::tempdir().unwrap();
    let extra = "[mail]\nemail_field = \"contact\"\n";
    let args = ConfigArgs { config: Some(write_config(dir.path(), extra)) };
    let message = command_check_config(&args).err().map(|err| err.to_string()).unwrap_or_default();
    assert!(message.starts_with("config check failed: "), "{message}");
    assert!(message.contains("contact"), "{message}");
}

#[test]
fn load_config_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let args = ConfigArgs { config: Some(dir.path().join("absent.toml")) };
    let message = load_config(&args).err().map(|err| err.to_string()).unwrap_or_default();
    assert!(message.starts_with("failed to load config: config io error"), "{message}");
}

#[test]
fn exposure_warning_skips_loopback_binds() {
    let dir = tempfile::tempdir().unwrap();
    let extra = "[server]\nbind = \"127.0.0.1:9000\"\nenvironment = \"production\"\n";
    let config = load_config(&ConfigArgs { config: Some(write_config(dir.path(), extra)) }).unwrap();
    assert!(warn_network_exposure(&config).is_ok());
}
