//! Expired-but-active credential detection.
//!
//! A credential qualifies when its Status is exactly `Active` and its
//! ExpiryDate falls before the evaluation date. ExpiryDate is parsed only
//! for Active rows; an unrecognizable value on such a row ends the run.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::table::Table;
use crate::{CredgateError, Result};

use super::models::{ACTIVE_STATUS, EXPIRY_DATE, Finding, STATUS};

/// Date-only layouts accepted for ExpiryDate, canonical first.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Date-time layouts accepted for ExpiryDate; the time part is ignored.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parses a calendar date, returning `None` when no known layout fits.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Counts Active credentials whose ExpiryDate is strictly before `today`.
///
/// Returns 0 without reading any row when the header has no ExpiryDate
/// column.
///
/// # Errors
/// [`CredgateError::InvalidDate`] for the first Active row whose ExpiryDate
/// cannot be parsed.
pub fn count_expired_active(table: &Table, today: NaiveDate) -> Result<usize> {
    if !table.has_column(EXPIRY_DATE) {
        tracing::debug!(
            "Skipping expiry check for {}: no {} column",
            table.name(),
            EXPIRY_DATE
        );
        return Ok(0);
    }

    let mut count: usize = 0;
    for record in table.records() {
        if record.get(STATUS) != Some(ACTIVE_STATUS) {
            continue;
        }

        let raw = record.get(EXPIRY_DATE).unwrap_or_default();
        let expiry = parse_calendar_date(raw).ok_or_else(|| CredgateError::InvalidDate {
            file: table.name().to_string(),
            line: record.line(),
            value: raw.to_string(),
        })?;

        if expiry < today {
            count = count.saturating_add(1);
        }
    }
    Ok(count)
}

/// Reports the expired-but-active count when it is non-zero.
pub fn check_expired_active(table: &Table, today: NaiveDate) -> Result<Option<Finding>> {
    let count = count_expired_active(table, today)?;
    Ok((count > 0).then(|| Finding::ExpiredActive {
        count,
        file: table.name().to_string(),
    }))
}
