//! Per-file check orchestration and the validation pass.

use chrono::NaiveDate;
use std::path::Path;

use crate::Result;
use crate::config::DataConfig;
use crate::discovery::{FilePattern, discover};
use crate::run_log::Reporter;
use crate::table::Table;

use super::completeness::check_missing_provider_ids;
use super::expiry::check_expired_active;
use super::models::{Feed, Finding, ValidationSummary};
use super::schema::check_schema;

/// Runs every check that applies to `feed` on one loaded file.
///
/// Findings come back in check order: missing columns, then missing
/// ProviderIDs, then (credential files only) expired-but-active rows.
pub fn analyze_table(feed: Feed, table: &Table, today: NaiveDate) -> Result<Vec<Finding>> {
    let mut findings = check_schema(feed, table);
    findings.extend(check_missing_provider_ids(table));

    if feed == Feed::Credential {
        findings.extend(check_expired_active(table, today)?);
    }

    Ok(findings)
}

/// Validates every provider and credential file in the input folder.
///
/// Provider files are checked before credential files, each feed in file
/// name order. Each finding is written to `reporter` as one line. A feed
/// with no matching files produces a single informational line.
///
/// # Errors
/// Fails on the first unreadable file, unparseable CSV, unrecognized
/// ExpiryDate on an Active credential, or reporter write failure.
pub fn validate_feeds<R: Reporter>(
    config: &DataConfig,
    reporter: &mut R,
    today: NaiveDate,
) -> Result<ValidationSummary> {
    reporter.record("Starting data quality validation")?;

    let mut summary = ValidationSummary::default();
    for feed in Feed::ALL {
        let pattern = FilePattern::new(feed.pattern(config))?;
        let files = discover(config.input_folder(), &pattern)?;

        if files.is_empty() {
            reporter.record(&format!(
                "No {feed} files found matching '{pattern}' in {}",
                config.input_folder().display()
            ))?;
            continue;
        }

        for path in &files {
            let found = validate_file(feed, path, reporter, today)?;
            summary.files_checked = summary.files_checked.saturating_add(1);
            summary.findings = summary.findings.saturating_add(found);
        }
    }

    reporter.record(&format!(
        "Data quality validation completed: {} file(s) checked, {} finding(s)",
        summary.files_checked, summary.findings
    ))?;
    Ok(summary)
}

/// Loads and checks one file, returning the number of findings written.
fn validate_file<R: Reporter>(
    feed: Feed,
    path: &Path,
    reporter: &mut R,
    today: NaiveDate,
) -> Result<usize> {
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    reporter.record(&format!("Validating {feed} file: {name}"))?;

    let table = Table::from_path(path)?;
    let findings = analyze_table(feed, &table, today)?;
    for finding in &findings {
        reporter.record(&finding.to_string())?;
    }

    tracing::debug!(
        "{} finding(s) in {} ({} rows)",
        findings.len(),
        name,
        table.len()
    );
    Ok(findings.len())
}
