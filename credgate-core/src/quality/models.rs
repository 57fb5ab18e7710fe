//! Feed definitions and finding types.
//!
//! A [`Finding`] renders to exactly one log line. Findings carry only the
//! file name and a column name or a count, never row values.

use crate::DataConfig;

/// Column holding the provider key in both feeds.
pub const PROVIDER_ID: &str = "ProviderID";
/// Column holding the record status.
pub const STATUS: &str = "Status";
/// Column holding the credential expiry date.
pub const EXPIRY_DATE: &str = "ExpiryDate";
/// Status value checked by the expired-but-active rule (case-sensitive).
pub const ACTIVE_STATUS: &str = "Active";

/// Columns every provider file must carry.
pub const PROVIDER_COLUMNS: [&str; 6] = [
    PROVIDER_ID,
    "FirstName",
    "LastName",
    "NPI",
    "Specialty",
    STATUS,
];

/// Columns every credential file must carry.
pub const CREDENTIAL_COLUMNS: [&str; 7] = [
    "CredentialID",
    PROVIDER_ID,
    "CredentialType",
    "CredentialNumber",
    "IssueDate",
    EXPIRY_DATE,
    STATUS,
];

/// One of the two validated feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feed {
    /// Provider roster
    Provider,
    /// Credential roster
    Credential,
}

impl Feed {
    /// Feeds in validation order.
    pub const ALL: [Self; 2] = [Self::Provider, Self::Credential];

    /// Lowercase name used in log lines.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Provider => "provider",
            Self::Credential => "credential",
        }
    }

    /// Columns that must be present in the header.
    pub const fn required_columns(self) -> &'static [&'static str] {
        match self {
            Self::Provider => &PROVIDER_COLUMNS,
            Self::Credential => &CREDENTIAL_COLUMNS,
        }
    }

    /// The configured file name glob for this feed.
    pub fn pattern(self, config: &DataConfig) -> &str {
        match self {
            Self::Provider => config.provider_file_pattern(),
            Self::Credential => config.credential_file_pattern(),
        }
    }
}

impl std::fmt::Display for Feed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single data-quality observation about one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// A required column is absent from the header
    MissingColumn {
        feed: Feed,
        column: String,
        file: String,
    },
    /// Rows whose ProviderID is absent or blank
    MissingProviderId { count: usize, file: String },
    /// Credentials with Status `Active` and an ExpiryDate in the past
    ExpiredActive { count: usize, file: String },
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingColumn { feed, column, file } => {
                write!(f, "Missing required column '{column}' in {feed} file: {file}")
            }
            Self::MissingProviderId { count, file } => {
                write!(f, "Found {count} rows with missing {PROVIDER_ID} in {file}")
            }
            Self::ExpiredActive { count, file } => {
                write!(f, "Found {count} credentials marked Active but expired in {file}")
            }
        }
    }
}

/// Counts from one validation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationSummary {
    /// Files discovered and checked across both feeds
    pub files_checked: usize,
    /// Finding lines written
    pub findings: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finding_lines() {
        let missing = Finding::MissingColumn {
            feed: Feed::Provider,
            column: "NPI".to_string(),
            file: "providers_1.csv".to_string(),
        };
        assert_eq!(
            missing.to_string(),
            "Missing required column 'NPI' in provider file: providers_1.csv"
        );

        let keys = Finding::MissingProviderId {
            count: 3,
            file: "credentials_1.csv".to_string(),
        };
        assert_eq!(
            keys.to_string(),
            "Found 3 rows with missing ProviderID in credentials_1.csv"
        );

        let expired = Finding::ExpiredActive {
            count: 2,
            file: "credentials_1.csv".to_string(),
        };
        assert_eq!(
            expired.to_string(),
            "Found 2 credentials marked Active but expired in credentials_1.csv"
        );
    }

    #[test]
    fn test_credential_column_label() {
        let missing = Finding::MissingColumn {
            feed: Feed::Credential,
            column: "ExpiryDate".to_string(),
            file: "c.csv".to_string(),
        };
        assert_eq!(
            missing.to_string(),
            "Missing required column 'ExpiryDate' in credential file: c.csv"
        );
    }

    #[test]
    fn test_feed_pattern_selection() {
        let config = DataConfig::new("in", "arc", "log", "p_*.csv", "c_*.csv");
        assert_eq!(Feed::Provider.pattern(&config), "p_*.csv");
        assert_eq!(Feed::Credential.pattern(&config), "c_*.csv");
        assert_eq!(Feed::Provider.required_columns().len(), 6);
        assert_eq!(Feed::Credential.required_columns().len(), 7);
    }
}
