//! File discovery by glob pattern.
//!
//! Patterns support `*`, `?` and bracket classes (`[abc]`, `[a-z]`,
//! `[!0-9]`) and must match the whole file name. Matching follows the host
//! convention: case-insensitive on Windows, case-sensitive elsewhere.

use regex::{Regex, RegexBuilder};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{CredgateError, Result};

/// A compiled file name glob.
#[derive(Debug, Clone)]
pub struct FilePattern {
    glob: String,
    regex: Regex,
}

impl FilePattern {
    /// Compiles `glob` into a whole-name matcher.
    pub fn new(glob: &str) -> Result<Self> {
        let regex = RegexBuilder::new(&glob_to_regex(glob))
            .case_insensitive(cfg!(windows))
            .build()
            .map_err(|source| CredgateError::InvalidPattern {
                pattern: glob.to_string(),
                source,
            })?;

        Ok(Self {
            glob: glob.to_string(),
            regex,
        })
    }

    /// Returns true when `file_name` matches the whole pattern.
    pub fn matches(&self, file_name: &str) -> bool {
        self.regex.is_match(file_name)
    }
}

impl std::fmt::Display for FilePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.glob)
    }
}

/// Translates a glob into an anchored regular expression.
///
/// An unterminated `[` is taken literally.
fn glob_to_regex(glob: &str) -> String {
    let chars: Vec<char> = glob.chars().collect();
    let mut out = String::with_capacity(glob.len().saturating_mul(2).saturating_add(2));
    out.push('^');

    let mut i = 0;
    while let Some(&c) = chars.get(i) {
        i = i.saturating_add(1);
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '[' => match bracket_class(&chars, i) {
                Some((class, next)) => {
                    out.push_str(&class);
                    i = next;
                }
                None => out.push_str(r"\["),
            },
            other => {
                let mut buf = [0u8; 4];
                out.push_str(&regex::escape(other.encode_utf8(&mut buf)));
            }
        }
    }

    out.push('$');
    out
}

/// Reads a bracket class starting just after `[`.
///
/// Returns the regex class and the index after the closing `]`, or `None`
/// when the class is never closed.
fn bracket_class(chars: &[char], start: usize) -> Option<(String, usize)> {
    let mut class = String::from("[");
    let mut i = start;

    if matches!(chars.get(i), Some('!' | '^')) {
        class.push('^');
        i = i.saturating_add(1);
    }
    // A leading `]` is a literal member.
    if chars.get(i) == Some(&']') {
        class.push_str(r"\]");
        i = i.saturating_add(1);
    }

    while let Some(&c) = chars.get(i) {
        i = i.saturating_add(1);
        match c {
            ']' => {
                class.push(']');
                return Some((class, i));
            }
            '\\' | '[' | '^' | '&' | '~' => {
                class.push('\\');
                class.push(c);
            }
            other => class.push(other),
        }
    }
    None
}

/// Lists regular files in `dir` whose names match `pattern`, sorted by name.
///
/// A missing directory yields an empty list. Subdirectories are not
/// searched.
pub fn discover(dir: &Path, pattern: &FilePattern) -> Result<Vec<PathBuf>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("Directory {} does not exist", dir.display());
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(CredgateError::io(
                format!("Failed to read directory {}", dir.display()),
                e,
            ));
        }
    };

    let mut matches = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            CredgateError::io(format!("Failed to list directory {}", dir.display()), e)
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            tracing::warn!("Skipping non UTF-8 file name in {}", dir.display());
            continue;
        };
        if pattern.matches(&name) {
            matches.push(path);
        }
    }

    matches.sort();
    tracing::debug!(
        "Discovered {} file(s) matching '{}' in {}",
        matches.len(),
        pattern,
        dir.display()
    );
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(glob: &str) -> FilePattern {
        FilePattern::new(glob).unwrap()
    }

    #[test]
    fn test_star_matches_any_run() {
        let p = pattern("providers_*.csv");
        assert!(p.matches("providers_20240101.csv"));
        assert!(p.matches("providers_.csv"));
        assert!(!p.matches("credentials_20240101.csv"));
        assert!(!p.matches("providers_20240101.csv.bak"));
        assert!(!p.matches("old_providers_1.csv"));
    }

    #[test]
    fn test_dot_is_literal() {
        let p = pattern("*.csv");
        assert!(p.matches("a.csv"));
        assert!(!p.matches("acsv"));
        assert!(!p.matches("a.csvx"));
    }

    #[test]
    fn test_question_mark_and_classes() {
        let p = pattern("feed_?[0-9].csv");
        assert!(p.matches("feed_a1.csv"));
        assert!(!p.matches("feed_ab.csv"));

        let negated = pattern("feed_[!0-9].csv");
        assert!(negated.matches("feed_x.csv"));
        assert!(!negated.matches("feed_7.csv"));
    }

    #[test]
    fn test_unterminated_bracket_is_literal() {
        let p = pattern("odd[name.csv");
        assert!(p.matches("odd[name.csv"));
        assert!(!p.matches("oddname.csv"));
    }

    #[test]
    fn test_regex_metacharacters_are_escaped() {
        let p = pattern("a+b(1).csv");
        assert!(p.matches("a+b(1).csv"));
        assert!(!p.matches("aab1.csv"));
    }

    #[cfg(not(windows))]
    #[test]
    fn test_case_sensitive_on_unix() {
        assert!(!pattern("providers_*.csv").matches("Providers_1.CSV"));
    }

    #[cfg(windows)]
    #[test]
    fn test_case_insensitive_on_windows() {
        assert!(pattern("providers_*.csv").matches("Providers_1.CSV"));
    }

    #[test]
    fn test_discover_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let found = discover(&dir.path().join("nope"), &pattern("*.csv")).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "providers_b.csv",
            "providers_a.csv",
            "credentials_a.csv",
            "notes.txt",
        ] {
            std::fs::write(dir.path().join(name), "x").unwrap();
        }
        std::fs::create_dir(dir.path().join("providers_dir.csv")).unwrap();

        let found = discover(dir.path(), &pattern("providers_*.csv")).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["providers_a.csv", "providers_b.csv"]);
    }
}
