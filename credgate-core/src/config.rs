//! Run configuration.
//!
//! The configuration is a small JSON document naming the input, archive and
//! log folders plus the two feed file patterns. It is loaded once per
//! invocation and passed by reference to each pass.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::{CredgateError, Result};

/// Config path used when none is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "./config/data-config.json";

/// Folder and pattern settings for one validation or archival run.
///
/// Keys use the `PascalCase` names of the on-disk document, e.g.
/// `{"InputFolder": "./data/input", "ProviderFilePattern": "providers_*.csv", ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataConfig {
    input_folder: PathBuf,
    archive_folder: PathBuf,
    log_folder: PathBuf,
    provider_file_pattern: String,
    credential_file_pattern: String,
}

impl DataConfig {
    /// Creates a configuration from explicit values.
    pub fn new(
        input_folder: impl Into<PathBuf>,
        archive_folder: impl Into<PathBuf>,
        log_folder: impl Into<PathBuf>,
        provider_file_pattern: impl Into<String>,
        credential_file_pattern: impl Into<String>,
    ) -> Self {
        Self {
            input_folder: input_folder.into(),
            archive_folder: archive_folder.into(),
            log_folder: log_folder.into(),
            provider_file_pattern: provider_file_pattern.into(),
            credential_file_pattern: credential_file_pattern.into(),
        }
    }

    /// Loads and validates the configuration at `path`.
    ///
    /// # Errors
    /// - [`CredgateError::ConfigNotFound`] if `path` does not exist
    /// - [`CredgateError::Serialization`] if the document is not valid JSON
    ///   or a key is missing
    /// - [`CredgateError::Configuration`] if a value is blank
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CredgateError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let raw = std::fs::read_to_string(path).map_err(|e| {
            CredgateError::io(format!("Failed to read {}", path.display()), e)
        })?;

        let config = Self::from_json(&raw).map_err(|e| match e {
            CredgateError::Serialization { source, .. } => CredgateError::Serialization {
                context: format!("Invalid configuration in {}", path.display()),
                source,
            },
            other => other,
        })?;

        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parses and validates a configuration document.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|source| CredgateError::Serialization {
                context: "Invalid configuration document".to_string(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects blank folders and patterns.
    ///
    /// A blank pattern would otherwise match nothing and silently turn a
    /// feed into a no-op.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("InputFolder", self.input_folder.as_os_str().is_empty()),
            ("ArchiveFolder", self.archive_folder.as_os_str().is_empty()),
            ("LogFolder", self.log_folder.as_os_str().is_empty()),
            (
                "ProviderFilePattern",
                self.provider_file_pattern.trim().is_empty(),
            ),
            (
                "CredentialFilePattern",
                self.credential_file_pattern.trim().is_empty(),
            ),
        ];

        for (name, blank) in fields {
            if blank {
                return Err(CredgateError::configuration(format!(
                    "{name} must not be empty"
                )));
            }
        }
        Ok(())
    }

    /// Directory scanned for incoming feed files.
    pub fn input_folder(&self) -> &Path {
        &self.input_folder
    }

    /// Directory that receives archived feed files.
    pub fn archive_folder(&self) -> &Path {
        &self.archive_folder
    }

    /// Directory that receives run logs.
    pub fn log_folder(&self) -> &Path {
        &self.log_folder
    }

    /// Glob selecting provider files.
    pub fn provider_file_pattern(&self) -> &str {
        &self.provider_file_pattern
    }

    /// Glob selecting credential files.
    pub fn credential_file_pattern(&self) -> &str {
        &self.credential_file_pattern
    }
}
