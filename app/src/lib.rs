//! Handlecheck Command-Line Shell
//!
//! This is the thin application shell that parses arguments, loads
//! configuration and prints results. Checking logic lives in the `crates/`
//! directory.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod error;
pub mod input;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local};
use clap::Parser;
use config::AppConfig;
use handlecheck_core::{format_report, format_result, format_summary, CheckResult, StatusCounts};
use handlecheck_resolver::HandleChecker;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "handlecheck")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Check whether social-platform handles are available")]
pub struct Cli {
    /// Handle to check, with or without a leading @
    #[arg(conflicts_with = "file")]
    pub handle: Option<String>,

    /// File with one handle per line for a bulk check
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Directory the bulk report is written to (default: current directory)
    #[arg(short, long)]
    pub report_dir: Option<PathBuf>,
}

/// Initialize tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,handlecheck=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Run the shell with parsed arguments and loaded configuration.
pub async fn run(cli: Cli, config: AppConfig) -> Result<()> {
    info!("Starting handlecheck v{}", env!("CARGO_PKG_VERSION"));

    let checker = HandleChecker::new(&config.checker).context("invalid checker configuration")?;

    let outcome = match (&cli.file, &cli.handle) {
        (Some(path), _) => {
            let report_dir = cli.report_dir.as_deref().unwrap_or(Path::new("."));
            run_bulk(&checker, &config, path, report_dir).await
        }
        (None, Some(text)) => run_single(&checker, text).await,
        (None, None) => Err(anyhow::anyhow!("expected a handle or --file <list.txt>")),
    };

    checker.shutdown().await;
    outcome
}

async fn run_single(checker: &HandleChecker, text: &str) -> Result<()> {
    let Some(handle) = input::single_handle(text) else {
        bail!("no handle given");
    };

    info!("Checking @{}", handle);
    let result = checker.check(handle).await;

    println!("{}", format_result(&result));
    if let Some(message) = result.message() {
        println!("{message}");
    }
    Ok(())
}

async fn run_bulk(
    checker: &HandleChecker,
    config: &AppConfig,
    path: &Path,
    report_dir: &Path,
) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let handles = input::parse_handle_bytes(&bytes);

    if handles.is_empty() {
        bail!("{} contains no handles", path.display());
    }
    if handles.len() > config.bulk.max_handles {
        bail!(
            "{} lists {} handles; the limit is {}",
            path.display(),
            handles.len(),
            config.bulk.max_handles
        );
    }

    println!("Checking {} handles...", handles.len());
    let results = checker.resolve_many(&handles).await;

    println!("{}", format_summary(&StatusCounts::tally(&results)));

    let report_path = write_report(report_dir, &results, Local::now())?;
    println!("Report written to {}", report_path.display());
    info!("Bulk run complete: {} handles", results.len());
    Ok(())
}

/// Report file name for a run started at `at`.
#[must_use]
pub fn report_file_name(at: DateTime<Local>) -> String {
    format!("handlecheck_report_{}.txt", at.format("%Y%m%d_%H%M%S"))
}

/// Write the full text report for `results` into `dir`.
pub fn write_report(dir: &Path, results: &[CheckResult], at: DateTime<Local>) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create report directory {}", dir.display()))?;

    let path = dir.join(report_file_name(at));
    fs::write(&path, format_report(results))
        .with_context(|| format!("failed to write report {}", path.display()))?;
    Ok(path)
}
