//! The match table: one CSV row per aligned passage pair.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::{Error, RawRecord, Result};

/// How to read a match table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Lines before the header line (the export carries a title line).
    pub skip_rows: usize,
    /// Zero-based column index of the row id.
    pub id_column: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            skip_rows: 1,
            id_column: 1,
        }
    }
}

/// Header and rows of a match table, rows in file order.
#[derive(Debug, Clone, Default)]
pub struct MatchTable {
    /// Column names.
    pub headers: Vec<String>,
    /// `(row id as written, row)` pairs.
    pub rows: Vec<(String, RawRecord)>,
}

impl MatchTable {
    /// Whether the header has this column.
    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }
}

/// Read a match table from a file.
///
/// # Errors
///
/// IO and CSV errors, or [`Error::IdentityViolation`] if a row has no id cell.
pub fn read_table(path: &Path, options: ReadOptions) -> Result<MatchTable> {
    let table = read_table_from(File::open(path)?, options)?;
    log::debug!("{}: {} rows", path.display(), table.rows.len());
    Ok(table)
}

/// Read a match table from any reader.
///
/// # Errors
///
/// See [`read_table`].
pub fn read_table_from<R: Read>(reader: R, options: ReadOptions) -> Result<MatchTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut records = reader.records().skip(options.skip_rows);

    let headers: Vec<String> = match records.next() {
        Some(header) => header?.iter().map(|h| h.trim().to_string()).collect(),
        None => return Ok(MatchTable::default()),
    };

    let mut rows = Vec::new();
    for (line, record) in records.enumerate() {
        let record = record?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let id = record
            .get(options.id_column)
            .map(|cell| cell.trim().to_string())
            .ok_or_else(|| {
                Error::identity(format!(
                    "data line {} has no id in column {}",
                    line + 1,
                    options.id_column
                ))
            })?;
        let row: RawRecord = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.as_str(), v))
            .collect();
        rows.push((id, row));
    }
    Ok(MatchTable { headers, rows })
}
