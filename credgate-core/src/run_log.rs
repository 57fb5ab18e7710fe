//! Timestamped run log.
//!
//! One validation run owns one append-only text file,
//! `<log dir>/data_quality_log_<YYYYMMDD_HHMMSS>.txt`, named from the
//! process start time. Every recorded message is written to that file,
//! flushed, and echoed to stdout before `record` returns.

use chrono::{Local, NaiveDateTime};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::{CredgateError, Result};

/// Destination for report lines.
///
/// The validation pass writes every informational line and finding through
/// this trait, in call order.
pub trait Reporter {
    /// Writes one message.
    fn record(&mut self, message: &str) -> Result<()>;
}

/// Collects messages in memory.
impl Reporter for Vec<String> {
    fn record(&mut self, message: &str) -> Result<()> {
        self.push(message.to_string());
        Ok(())
    }
}

/// Writes messages to stdout only.
///
/// Used by the archival pass, which keeps no log file.
#[derive(Debug, Clone, Copy, Default)]
pub struct Console;

impl Reporter for Console {
    fn record(&mut self, message: &str) -> Result<()> {
        write_line(&mut std::io::stdout().lock(), message)
    }
}

/// Writes `line` to `out`, reporting a closed or broken stream as an error.
fn write_line<W: Write>(out: &mut W, line: &str) -> Result<()> {
    writeln!(out, "{line}")
        .and_then(|()| out.flush())
        .map_err(|e| CredgateError::io("Failed to write to stdout", e))
}

/// The append-only log file of one validation run.
#[derive(Debug)]
pub struct RunLog {
    path: PathBuf,
    file: File,
    echo: bool,
}

impl RunLog {
    /// Builds the log file name for a run started at `started_at`.
    pub fn file_name(started_at: NaiveDateTime) -> String {
        format!(
            "data_quality_log_{}.txt",
            started_at.format("%Y%m%d_%H%M%S")
        )
    }

    /// Creates `log_dir` if needed and opens the run's log file for append.
    ///
    /// # Errors
    /// Fails when the directory cannot be created or the file cannot be
    /// opened; the run cannot proceed without its log.
    pub fn create(log_dir: &Path, started_at: NaiveDateTime) -> Result<Self> {
        std::fs::create_dir_all(log_dir).map_err(|e| {
            CredgateError::io(
                format!("Failed to create log directory {}", log_dir.display()),
                e,
            )
        })?;

        let path = log_dir.join(Self::file_name(started_at));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                CredgateError::io(format!("Failed to open log file {}", path.display()), e)
            })?;

        tracing::debug!("Writing run log to {}", path.display());
        Ok(Self {
            path,
            file,
            echo: true,
        })
    }

    /// Enables or disables the stdout echo. Enabled by default.
    #[must_use]
    pub const fn with_console_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Location of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Reporter for RunLog {
    fn record(&mut self, message: &str) -> Result<()> {
        let line = format!("{} - {message}", Local::now().format("%Y-%m-%d %H:%M:%S"));

        writeln!(self.file, "{line}")
            .and_then(|()| self.file.flush())
            .map_err(|e| {
                CredgateError::io(format!("Failed to write log file {}", self.path.display()), e)
            })?;

        if self.echo {
            write_line(&mut std::io::stdout().lock(), &line)?;
        }
        Ok(())
    }
}
