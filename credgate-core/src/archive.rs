//! Archival of input feed files.
//!
//! Every `*.csv` file in the input folder is moved into the archive folder
//! under the same name, whether or not it matched a feed pattern and
//! whatever its validation outcome. An archived file with the same name is
//! replaced.

use std::path::Path;

use crate::config::DataConfig;
use crate::discovery::{FilePattern, discover};
use crate::run_log::Reporter;
use crate::{CredgateError, Result};

/// Files swept by the archival pass.
pub const ARCHIVE_PATTERN: &str = "*.csv";

/// Counts from one archival pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArchiveSummary {
    /// Files moved into the archive
    pub moved: usize,
    /// Files that could not be moved and were left in place
    pub failed: usize,
}

impl ArchiveSummary {
    /// Returns true when every discovered file was moved.
    pub const fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// Moves every CSV file from the input folder to the archive folder.
///
/// Each successful move is written to `console`. A file that cannot be
/// moved is reported as an error diagnostic, counted in
/// [`ArchiveSummary::failed`], and skipped; the remaining files are still
/// processed.
///
/// # Errors
/// Fails when the archive folder cannot be created, the input folder cannot
/// be listed, or `console` fails.
pub fn archive_inputs<R: Reporter>(config: &DataConfig, console: &mut R) -> Result<ArchiveSummary> {
    let input_dir = config.input_folder();
    let archive_dir = config.archive_folder();

    std::fs::create_dir_all(archive_dir).map_err(|e| {
        CredgateError::io(
            format!("Failed to create archive directory {}", archive_dir.display()),
            e,
        )
    })?;

    let pattern = FilePattern::new(ARCHIVE_PATTERN)?;
    let files = discover(input_dir, &pattern)?;
    let mut summary = ArchiveSummary::default();

    if files.is_empty() {
        console.record(&format!("No CSV files found in {}", input_dir.display()))?;
        return Ok(summary);
    }

    for source in &files {
        let Some(name) = source.file_name() else {
            continue;
        };
        let destination = archive_dir.join(name);

        match move_file(source, &destination) {
            Ok(()) => {
                console.record(&format!(
                    "Moved {} to {}",
                    name.to_string_lossy(),
                    archive_dir.display()
                ))?;
                summary.moved = summary.moved.saturating_add(1);
            }
            Err(e) => {
                tracing::error!("Failed to archive {}: {}", source.display(), e);
                summary.failed = summary.failed.saturating_add(1);
            }
        }
    }

    tracing::debug!(
        "Archived {} file(s), {} failure(s)",
        summary.moved,
        summary.failed
    );
    Ok(summary)
}

/// Moves `source` to `destination`, replacing any existing file there.
///
/// Tries a rename first and falls back to copy-then-delete, which covers
/// moves across filesystems and platforms where rename will not replace an
/// existing file.
///
/// When the copy succeeds but the source cannot be deleted, the file is left
/// in both folders and the error names both paths.
pub fn move_file(source: &Path, destination: &Path) -> Result<()> {
    match std::fs::rename(source, destination) {
        Ok(()) => return Ok(()),
        Err(e) => tracing::debug!(
            "Rename of {} failed ({}), copying instead",
            source.display(),
            e
        ),
    }

    std::fs::copy(source, destination).map_err(|e| {
        CredgateError::io(
            format!(
                "Failed to copy {} to {}",
                source.display(),
                destination.display()
            ),
            e,
        )
    })?;
    remove_copied(source, destination)
}

fn remove_copied(source: &Path, destination: &Path) -> Result<()> {
    std::fs::remove_file(source).map_err(|e| {
        CredgateError::io(
            format!(
                "Failed to remove {} after copying; file remains in both {} and {}",
                source.display(),
                source.display(),
                destination.display()
            ),
            e,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_file_replaces_destination() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.csv");
        let destination = dir.path().join("b.csv");
        std::fs::write(&source, "new").unwrap();
        std::fs::write(&destination, "old").unwrap();

        move_file(&source, &destination).unwrap();
        assert!(!source.exists());
        assert_eq!(std::fs::read_to_string(&destination).unwrap(), "new");
    }

    #[test]
    fn test_move_file_missing_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = move_file(&dir.path().join("gone.csv"), &dir.path().join("x.csv")).unwrap_err();
        assert!(matches!(err, CredgateError::Io { .. }));
    }

    #[test]
    fn test_failed_cleanup_names_both_copies() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("input").join("providers_1.csv");
        let destination = dir.path().join("archive").join("providers_1.csv");

        let err = remove_copied(&source, &destination).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("remains in both"), "{message}");
        assert!(message.contains(&source.display().to_string()));
        assert!(message.contains(&destination.display().to_string()));
    }

    #[test]
    fn test_summary_completeness() {
        assert!(ArchiveSummary::default().is_complete());
        assert!(!ArchiveSummary { moved: 3, failed: 1 }.is_complete());
    }
}
