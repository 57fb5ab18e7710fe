//! Missing-key detection.
//!
//! Counts rows whose ProviderID is absent or blank. When the header has no
//! ProviderID column at all, every row counts.

use crate::table::Table;

use super::models::{Finding, PROVIDER_ID};

/// Number of rows without a usable ProviderID.
pub fn count_missing_provider_ids(table: &Table) -> usize {
    table
        .records()
        .filter(|record| record.is_blank(PROVIDER_ID))
        .count()
}

/// Reports the missing ProviderID count when it is non-zero.
pub fn check_missing_provider_ids(table: &Table) -> Option<Finding> {
    let count = count_missing_provider_ids(table);
    (count > 0).then(|| Finding::MissingProviderId {
        count,
        file: table.name().to_string(),
    })
}
