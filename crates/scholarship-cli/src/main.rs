// crates/scholarship-cli/src/main.rs
// ============================================================================
// Module: Scholarship Form CLI Entry Point
// Description: Command dispatcher for serving and checking the form.
// Purpose: Start the form server or validate its configuration offline.
// Dependencies: clap, scholarship-config, scholarship-web, thiserror, tokio.
// ============================================================================

//! ## Overview
//! `scholarship-form serve` builds every backend from the configuration file
//! and serves the form. `check-config` validates the file and the schema it
//! names without opening the store, and `render-form` prints the form page
//! the server would return for `GET /`. Errors go to stderr with exit code 1.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use scholarship_config::Environment;
use scholarship_config::ScholarshipConfig;
use scholarship_web::FormServer;
use scholarship_web::check_config;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Definitions
// ============================================================================

/// Scholarship application form server.
#[derive(Debug, Parser)]
#[command(name = "scholarship-form", version, about)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Serve the application form over HTTP.
    Serve(ConfigArgs),
    /// Validate the configuration and form schema.
    CheckConfig(ConfigArgs),
    /// Print the form page to stdout.
    RenderForm(ConfigArgs),
}

/// Arguments shared by every subcommand.
#[derive(Debug, Args)]
struct ConfigArgs {
    /// Config file path (defaults to `SCHOLARSHIP_FORM_CONFIG` or
    /// `scholarship-form.toml`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self { message }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(args) => command_serve(args).await,
        Commands::CheckConfig(args) => command_check_config(&args),
        Commands::RenderForm(args) => command_render_form(args).await,
    }
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Executes the `serve` command.
async fn command_serve(args: ConfigArgs) -> CliResult<ExitCode> {
    let config = load_config(&args)?;
    warn_network_exposure(&config)?;
    let server = build_server(config).await?;
    server.serve().await.map_err(|err| CliError::new(format!("server failed: {err}")))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `check-config` command.
fn command_check_config(args: &ConfigArgs) -> CliResult<ExitCode> {
    let config = load_config(args)?;
    let schema =
        check_config(&config).map_err(|err| CliError::new(format!("config check failed: {err}")))?;
    write_stdout_line(&format!(
        "config ok: {} general fields, {} file inputs, environment {}",
        schema.general_info.len(),
        schema.file_inputs.len(),
        config.server.environment.as_str()
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `render-form` command.
async fn command_render_form(args: ConfigArgs) -> CliResult<ExitCode> {
    let config = load_config(&args)?;
    let server = build_server(config).await?;
    let app = server.app();
    let page = tokio::task::spawn_blocking(move || app.form_page(None))
        .await
        .map_err(|err| CliError::new(format!("render join failed: {err}")))?;
    let mut stdout = std::io::stdout();
    stdout
        .write_all(page.as_bytes())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Loads configuration from the path in `args` or the default locations.
fn load_config(args: &ConfigArgs) -> CliResult<ScholarshipConfig> {
    ScholarshipConfig::load(args.config.as_deref())
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))
}

/// Builds the server on the blocking pool; backends perform blocking I/O.
async fn build_server(config: ScholarshipConfig) -> CliResult<FormServer> {
    tokio::task::spawn_blocking(move || FormServer::from_config(config))
        .await
        .map_err(|err| CliError::new(format!("server init failed: init join failed: {err}")))?
        .map_err(|err| CliError::new(format!("server init failed: {err}")))
}

/// Warns when a production server binds a non-loopback address.
fn warn_network_exposure(config: &ScholarshipConfig) -> CliResult<()> {
    let Ok(addr) = config.server.bind_addr() else {
        return Ok(());
    };
    if addr.ip().is_loopback() || config.server.environment != Environment::Production {
        return Ok(());
    }
    write_stderr_line(&format!(
        "scholarship-form: WARNING: serving plain HTTP on {addr}; terminate TLS upstream"
    ))
    .map_err(|err| CliError::new(output_error("stderr", &err)))
}

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
