//! Error types for concord.

use thiserror::Error;

/// Result type for concord operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for concord operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A raw annotation value does not follow the compact mention/tag grammar.
    ///
    /// `field` is empty when the codec is called directly and is filled in
    /// with the column name once the value is read from a record.
    #[error("Malformed annotation in '{field}': {reason} (raw value: {value:?})")]
    MalformedAnnotation {
        /// Column the value came from, e.g. `person_domenico`.
        field: String,
        /// The offending raw value, verbatim.
        value: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The operation exists in the API but has no implementation.
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// A match identifier is not an integer or is not unique.
    #[error("Identity violation: {0}")]
    IdentityViolation(String),

    /// A required column is absent from a record.
    #[error("Missing field: {0}")]
    MissingField(String),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A passage span does not fit inside its book text.
    #[error("Invalid span {begin}..{end} for book '{book}' ({len} chars)")]
    InvalidSpan {
        /// Book shorthand.
        book: String,
        /// Start character offset.
        begin: i64,
        /// End character offset.
        end: i64,
        /// Length of the book text in characters.
        len: usize,
    },

    /// A failure while building one match row.
    #[error("Row {row} ({side}): {source}")]
    Row {
        /// Row identifier as found in the source.
        row: String,
        /// Side key the failure belongs to.
        side: String,
        /// Underlying error.
        #[source]
        source: Box<Error>,
    },

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV reading error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Create a malformed annotation error with no field attached yet.
    #[must_use]
    pub fn malformed(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedAnnotation {
            field: String::new(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a not implemented error.
    #[must_use]
    pub fn not_implemented(what: impl Into<String>) -> Self {
        Self::NotImplemented(what.into())
    }

    /// Create an identity violation error.
    #[must_use]
    pub fn identity(msg: impl Into<String>) -> Self {
        Self::IdentityViolation(msg.into())
    }

    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a config error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Attach a column name to a malformed annotation error.
    ///
    /// Other variants pass through unchanged.
    #[must_use]
    pub fn in_field(self, name: &str) -> Self {
        match self {
            Self::MalformedAnnotation { value, reason, .. } => Self::MalformedAnnotation {
                field: name.to_string(),
                value,
                reason,
            },
            other => other,
        }
    }

    /// Wrap this error with the row and side it occurred on.
    #[must_use]
    pub fn at_row(self, row: impl Into<String>, side: impl Into<String>) -> Self {
        Self::Row {
            row: row.into(),
            side: side.into(),
            source: Box::new(self),
        }
    }

    /// Returns true for failures that only affect a single record.
    ///
    /// Ingestion rejects the record and keeps going on these; anything else
    /// aborts the load.
    #[must_use]
    pub fn is_record_local(&self) -> bool {
        match self {
            Self::MalformedAnnotation { .. }
            | Self::MissingField(_)
            | Self::InvalidInput(_)
            | Self::InvalidSpan { .. } => true,
            Self::Row { source, .. } => source.is_record_local(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_field_fills_column_name() {
        let e = Error::malformed("A,,B", "empty token").in_field("person_domenico");
        match e {
            Error::MalformedAnnotation { field, value, .. } => {
                assert_eq!(field, "person_domenico");
                assert_eq!(value, "A,,B");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn in_field_leaves_other_variants() {
        let e = Error::invalid_input("x").in_field("place_left");
        assert!(matches!(e, Error::InvalidInput(_)));
    }

    #[test]
    fn row_wrapper_reports_value_and_location() {
        let e = Error::malformed("Titian,,Raphael", "empty token")
            .in_field("person_baldinucci")
            .at_row("42", "baldinucci");
        let msg = e.to_string();
        assert!(msg.contains("Row 42"));
        assert!(msg.contains("baldinucci"));
        assert!(msg.contains("Titian,,Raphael"));
        assert!(e.is_record_local());
    }

    #[test]
    fn identity_errors_are_not_record_local() {
        assert!(!Error::identity("duplicate id 3").is_record_local());
        assert!(!Error::not_implemented("common_entities").is_record_local());
    }
}
