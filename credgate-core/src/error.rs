//! Error types for credgate operations.
//!
//! Every fatal condition of a validation or archival run maps to one
//! variant here. Data-quality findings are not errors and never appear in
//! this module.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for credgate operations.
#[derive(Debug, Error)]
pub enum CredgateError {
    /// The configuration file does not exist
    #[error("Configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// Configuration value is unusable
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// JSON parsing or shape mismatch
    #[error("Serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// I/O operation failed
    #[error("I/O operation failed: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV header or record could not be read
    #[error("CSV parsing failed: {context}")]
    Csv {
        context: String,
        #[source]
        source: csv::Error,
    },

    /// A file name glob could not be compiled
    #[error("Invalid file pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// ExpiryDate is not a recognizable calendar date
    #[error("Unrecognized ExpiryDate '{value}' in {file} at line {line}")]
    InvalidDate {
        file: String,
        line: u64,
        value: String,
    },
}

/// Convenience type alias for Results with `CredgateError`
pub type Result<T> = std::result::Result<T, CredgateError>;

impl CredgateError {
    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates an I/O error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Creates a CSV error with context
    pub fn csv(context: impl Into<String>, source: csv::Error) -> Self {
        Self::Csv {
            context: context.into(),
            source,
        }
    }

    /// Renders the error followed by each underlying cause.
    pub fn display_chain(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = std::error::Error::source(cause);
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_message() {
        let error = CredgateError::ConfigNotFound {
            path: PathBuf::from("./config/data-config.json"),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: ./config/data-config.json"
        );
    }

    #[test]
    fn test_invalid_date_names_file_line_and_value() {
        let error = CredgateError::InvalidDate {
            file: "credentials_0101.csv".to_string(),
            line: 4,
            value: "not-a-date".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("credentials_0101.csv"));
        assert!(message.contains("line 4"));
        assert!(message.contains("not-a-date"));
    }

    #[test]
    fn test_error_creation() {
        let error = CredgateError::configuration("LogFolder must not be empty");
        assert!(error.to_string().contains("LogFolder must not be empty"));

        let error = CredgateError::io(
            "Failed to read input directory",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(error.to_string().contains("Failed to read input directory"));
    }

    #[test]
    fn test_display_chain_includes_source() {
        let error = CredgateError::io(
            "Failed to open log file logs/x.txt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(
            error.display_chain(),
            "I/O operation failed: Failed to open log file logs/x.txt: denied"
        );
    }
}
