//! Shared diagnostic logging for the credgate binaries.
//!
//! Diagnostics go to stderr through `tracing`. They are separate from the
//! run log and the report lines on stdout, which are always written.

use crate::Result;

/// Maps the CLI verbosity flags to a maximum tracing level.
///
/// `quiet` wins over any number of `-v` flags.
pub const fn level_for(verbose: u8, quiet: bool) -> tracing::Level {
    match (quiet, verbose) {
        (true, _) => tracing::Level::ERROR,
        (false, 0) => tracing::Level::INFO,
        (false, 1) => tracing::Level::DEBUG,
        (false, _) => tracing::Level::TRACE,
    }
}

/// Initializes diagnostic logging based on verbosity level.
///
/// # Arguments
/// * `verbose` - Verbosity level (0=INFO, 1=DEBUG, 2+=TRACE)
/// * `quiet` - If true, only show ERROR level diagnostics
///
/// # Example
/// ```rust,no_run
/// use credgate_core::logging::init_logging;
///
/// init_logging(1, false).expect("Failed to initialize logging");
/// ```
pub fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(level_for(verbose, quiet))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init()
        .map_err(|e| {
            crate::error::CredgateError::configuration(format!(
                "Failed to initialize logging: {e}"
            ))
        })?;

    Ok(())
}
