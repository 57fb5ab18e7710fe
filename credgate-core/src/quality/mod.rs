//! Feed quality checks.
//!
//! This module provides the three check families applied to each feed file:
//! - **Schema**: required columns present in the header
//! - **Completeness**: rows with an absent or blank ProviderID
//! - **Expiry**: credentials marked `Active` whose ExpiryDate has passed
//!   (credential files only)
//!
//! Findings are reported, never fatal. Cross-file checks such as a
//! credential's ProviderID referring to a known provider are not performed.
//!
//! # Example
//! ```rust,ignore
//! use credgate_core::{DataConfig, RunLog, validate_feeds};
//!
//! let config = DataConfig::load(path)?;
//! let mut log = RunLog::create(config.log_folder(), started_at)?;
//! let summary = validate_feeds(&config, &mut log, today)?;
//! ```

mod analyzer;
mod completeness;
mod expiry;
mod models;
mod schema;


// Re-export public API
pub use analyzer::{analyze_table, validate_feeds};
pub use completeness::{check_missing_provider_ids, count_missing_provider_ids};
pub use expiry::{check_expired_active, count_expired_active, parse_calendar_date};
pub use models::{
    ACTIVE_STATUS, CREDENTIAL_COLUMNS, EXPIRY_DATE, Feed, Finding, PROVIDER_COLUMNS, PROVIDER_ID,
    STATUS, ValidationSummary,
};
pub use schema::check_schema;
