//! CSV feed loading.
//!
//! A feed file is read into its header plus untyped string records. The
//! header is indexed once per file, so checks look columns up by name
//! without inspecting each row's shape.
//!
//! Cells that are not valid UTF-8 (legacy exports) are decoded lossily so a
//! stray byte in a field no check reads never stops the run.

use csv::{ByteRecord, ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::{CredgateError, Result};

/// A parsed CSV file.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    columns: HashMap<String, usize>,
    records: Vec<StringRecord>,
}

impl Table {
    /// Reads the CSV file at `path`.
    ///
    /// The table is named after the file name, which is what findings
    /// report.
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        let file = std::fs::File::open(path)
            .map_err(|e| CredgateError::io(format!("Failed to open {}", path.display()), e))?;
        Self::from_reader(name, file)
    }

    /// Reads CSV content from any reader.
    ///
    /// Rows may be shorter or longer than the header; missing trailing
    /// cells read as absent.
    pub fn from_reader<R: Read>(name: impl Into<String>, reader: R) -> Result<Self> {
        let name = name.into();
        let mut reader = ReaderBuilder::new()
            .trim(Trim::Headers)
            .flexible(true)
            .from_reader(reader);

        let headers = reader
            .byte_headers()
            .map_err(|e| CredgateError::csv(format!("Failed to read header of {name}"), e))?
            .clone();

        let mut columns = HashMap::with_capacity(headers.len());
        for (index, header) in headers.iter().enumerate() {
            let header = String::from_utf8_lossy(header);
            let header = header.trim_start_matches('\u{feff}').trim();
            columns.entry(header.to_string()).or_insert(index);
        }

        let records = reader
            .byte_records()
            .map(|record| record.map(decode_lossy))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| CredgateError::csv(format!("Failed to read records of {name}"), e))?;

        tracing::debug!(
            "Loaded {} with {} column(s) and {} row(s)",
            name,
            headers.len(),
            records.len()
        );

        Ok(Self {
            name,
            columns,
            records,
        })
    }

    /// File name the table was loaded from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true when the header contains `column` (exact match).
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    /// Required columns absent from the header, in the order given.
    pub fn missing_columns<'c>(&self, required: &[&'c str]) -> Vec<&'c str> {
        required
            .iter()
            .copied()
            .filter(|column| !self.has_column(column))
            .collect()
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true when the file has no data rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates data rows in file order.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.records.iter().enumerate().map(|(index, record)| Record {
            columns: &self.columns,
            record,
            // header is line 1
            fallback_line: u64::try_from(index).unwrap_or(u64::MAX).saturating_add(2),
        })
    }
}

/// Converts a raw row to text, replacing invalid UTF-8 sequences.
fn decode_lossy(record: ByteRecord) -> StringRecord {
    let position = record.position().cloned();
    let mut decoded = StringRecord::from_byte_record_lossy(record);
    decoded.set_position(position);
    decoded
}

/// One data row viewed through its table's header.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    columns: &'a HashMap<String, usize>,
    record: &'a StringRecord,
    fallback_line: u64,
}

impl<'a> Record<'a> {
    /// Value of `column`, or `None` when the header lacks it or the row is
    /// too short.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let index = *self.columns.get(column)?;
        self.record.get(index)
    }

    /// Returns true when `column` is absent or blank.
    pub fn is_blank(&self, column: &str) -> bool {
        self.get(column).is_none_or(|value| value.trim().is_empty())
    }

    /// 1-based line number of the row in its source file.
    pub fn line(&self) -> u64 {
        self.record
            .position()
            .map_or(self.fallback_line, csv::Position::line)
    }
}
