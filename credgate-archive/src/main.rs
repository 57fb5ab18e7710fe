//! Feed archival tool.
//!
//! This binary moves every CSV file in the configured input folder into the
//! archive folder, replacing archived files of the same name. It runs
//! independently of validation and does not look at validation results.
//!
//! # Exit Status
//! - 0 when every file was moved (or there was nothing to move)
//! - 1 when the configuration file is missing, a fatal error occurs, or at
//!   least one file could not be moved

use clap::{Args, Parser};
use credgate_core::{Console, DEFAULT_CONFIG_PATH, DataConfig, Result, archive_inputs, init_logging};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "credgate-archive")]
#[command(about = "Move input CSV files into the archive folder")]
#[command(version)]
#[command(long_about = "
credgate archive - relocate delivered feed files

Moves every *.csv file in the configured input folder into the archive
folder. A file already archived under the same name is replaced. Each move
is printed to stdout; no log file is written.

EXAMPLES:
  credgate-archive
  credgate-archive --config-path /etc/credgate/data-config.json
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
    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e.display_chain());
            ExitCode::FAILURE
        }
    }
}

/// Loads the configuration and runs one archival pass.
///
/// Returns whether every discovered file was moved.
fn run(cli: &Cli) -> Result<bool> {
    init_logging(cli.global.verbose, cli.global.quiet)?;

    let config = DataConfig::load(&cli.config_path)?;
    info!(
        "Archiving {} into {}",
        config.input_folder().display(),
        config.archive_folder().display()
    );

    let summary = archive_inputs(&config, &mut Console)?;

    if summary.is_complete() {
        info!("✓ Archived {} file(s)", summary.moved);
    } else {
        warn!(
            "Archived {} file(s), {} could not be moved",
            summary.moved, summary.failed
        );
    }
    Ok(summary.is_complete())
}
