//! Feed validation tool.
//!
//! This binary checks the provider and credential CSV files in the
//! configured input folder and writes every finding to a timestamped run
//! log and to stdout. Findings never change the exit status.
//!
//! # Exit Status
//! - 0 when the run completes, whatever it found
//! - 1 when the configuration file is missing or any fatal error occurs

use chrono::Local;
use clap::{Args, Parser};
use credgate_core::{
    DEFAULT_CONFIG_PATH, DataConfig, Result, RunLog, init_logging, validate_feeds,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser)]
#[command(name = "credgate-validate")]
#[command(about = "Provider and credential feed validation")]
#[command(version)]
#[command(long_about = "
credgate validate - data quality checks for provider and credential feeds

For every file matching the configured patterns in the input folder:
- Required columns must be present in the header
- Rows without a ProviderID are counted
- Credentials marked Active with a past ExpiryDate are counted

Findings go to <LogFolder>/data_quality_log_<YYYYMMDD_HHMMSS>.txt and to
stdout. Input files are left in place; run credgate-archive to move them.

EXAMPLES:
  credgate-validate
  credgate-validate --config-path /etc/credgate/data-config.json
")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Configuration file path
    #[arg(
        short,
        long,
        env = "CREDGATE_CONFIG",
        default_value = DEFAULT_CONFIG_PATH,
        help = "Path to the JSON configuration file"
    )]
    pub config_path: PathBuf,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Increase verbosity
    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Increase diagnostic verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    /// Suppress diagnostics
    #[arg(short, long, help = "Only show error diagnostics")]
    pub quiet: bool,
}

fn main() -> ExitCode {
    let started_at = Local::now();
    let cli = Cli::parse();

    match run(&cli, started_at) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e.display_chain());
            ExitCode::FAILURE
        }
    }
}

/// Loads the configuration and runs one validation pass.
fn run(cli: &Cli, started_at: chrono::DateTime<Local>) -> Result<()> {
    init_logging(cli.global.verbose, cli.global.quiet)?;

    let config = DataConfig::load(&cli.config_path)?;
    info!("Input: {}", config.input_folder().display());

    let mut log = RunLog::create(config.log_folder(), started_at.naive_local())?;
    info!("Log: {}", log.path().display());

    let summary = validate_feeds(&config, &mut log, started_at.date_naive())?;

    info!(
        "✓ Validation completed: {} file(s), {} finding(s)",
        summary.files_checked, summary.findings
    );
    Ok(())
}
