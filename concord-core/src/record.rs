//! Raw match-table rows.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One source row: ordered `(column, value)` pairs, kept verbatim.
///
/// A match retains its record for traceability, so nothing here is
/// normalized. Empty cells are stored as empty strings and read back as
/// absent through [`RawRecord::get`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    columns: Vec<(String, String)>,
}

impl RawRecord {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(column, value);
        self
    }

    /// Append a column in place.
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.columns.push((column.into(), value.into()));
    }

    /// Whether the row has this column at all.
    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|(c, _)| c == column)
    }

    /// Verbatim cell value.
    #[must_use]
    pub fn raw(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    /// Cell value, with missing columns and blank cells both read as `None`.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.raw(column).filter(|v| !v.trim().is_empty())
    }

    /// Cell value of a column that must exist; a blank cell reads as `None`.
    ///
    /// # Errors
    ///
    /// [`Error::MissingField`] when the column is not in the row.
    pub fn require(&self, column: &str) -> Result<Option<&str>> {
        if self.has_column(column) {
            Ok(self.get(column))
        } else {
            Err(Error::MissingField(column.to_string()))
        }
    }

    /// Integer cell of a column that must exist and be filled.
    ///
    /// Accepts a trailing `.0`, as spreadsheet exports write integer columns
    /// containing blanks as floats.
    ///
    /// # Errors
    ///
    /// [`Error::MissingField`] for an absent column or blank cell,
    /// [`Error::InvalidInput`] when the value is not an integer.
    pub fn require_int(&self, column: &str) -> Result<i64> {
        let value = self
            .require(column)?
            .ok_or_else(|| Error::MissingField(format!("{column} (blank)")))?;
        parse_int(value)
            .ok_or_else(|| Error::invalid_input(format!("{column}: '{value}' is not an integer")))
    }

    /// Columns starting with `prefix`, prefix stripped, in row order.
    pub fn with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.columns.iter().filter_map(move |(c, v)| {
            c.strip_prefix(prefix).map(|key| (key, v.as_str()))
        })
    }

    /// All columns in row order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns.iter().map(|(c, v)| (c.as_str(), v.as_str()))
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Parse an integer cell, tolerating a `.0` float rendering.
#[must_use]
pub fn parse_int(value: &str) -> Option<i64> {
    let value = value.trim();
    value
        .parse::<i64>()
        .ok()
        .or_else(|| value.strip_suffix(".0").and_then(|v| v.parse().ok()))
}
