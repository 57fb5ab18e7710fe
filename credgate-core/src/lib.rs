//! Core checks and file handling for the credgate feed quality gate.
//!
//! This crate provides everything the two credgate binaries share: the
//! configuration loader, glob-based file discovery, CSV table loading, the
//! provider and credential checks, the timestamped run log, and the archiver.
//!
//! # Operating Model
//! - Validation and archival are independent, single-pass sweeps
//! - Findings are reported, never fatal, never written back to the source
//! - Everything is synchronous and local to the filesystem
//!
//! # Architecture
//! - Configuration is an explicit immutable value passed to each pass
//! - Checks write findings through the [`Reporter`] trait
//! - One error enum with context for every fatal condition

pub mod archive;
pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod quality;
pub mod run_log;
pub mod table;

// Re-export commonly used types
pub use archive::{ArchiveSummary, archive_inputs};
pub use config::{DEFAULT_CONFIG_PATH, DataConfig};
pub use discovery::{FilePattern, discover};
pub use error::{CredgateError, Result};
pub use logging::init_logging;
pub use quality::{Feed, Finding, ValidationSummary, validate_feeds};
pub use run_log::{Console, Reporter, RunLog};
pub use table::{Record, Table};
