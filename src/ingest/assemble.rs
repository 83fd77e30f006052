//! Turning match-table rows into a [`BooksComparison`].

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::ingest::table::MatchTable;
use crate::{Book, BooksComparison, Error, Match, Passage, RawRecord, Result};

/// Column holding the free-text relevance status.
pub const IRRELEVANT_COLUMN: &str = "irrelevant";

/// Prefix of columns collected into [`Match::meta`].
pub const META_PREFIX: &str = "meta.";

/// A row that could not be turned into a match.
#[derive(Debug)]
pub struct Rejection {
    /// Row id.
    pub row: i64,
    /// Why the row was rejected; carries the side and offending value.
    pub error: Error,
}

/// Result of building a comparison: the matches that parsed and the rows
/// that did not.
#[derive(Debug)]
pub struct LoadReport {
    /// The comparison, matches in table order.
    pub comparison: BooksComparison,
    /// Rejected rows, in table order.
    pub rejected: Vec<Rejection>,
}

impl LoadReport {
    /// Whether every row became a match.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Columns every row must provide for a side keyed `key`.
#[must_use]
pub fn required_columns(key: &str) -> Vec<String> {
    let mut columns: Vec<String> = ["begin", "end", "image_number", "text"]
        .iter()
        .map(|field| format!("{key}.{field}"))
        .collect();
    columns.extend(
        ["person", "work", "form", "content", "patron"]
            .iter()
            .map(|kind| format!("{kind}_{key}")),
    );
    columns
}

/// Build a comparison from a match table.
///
/// Row ids must all be integers and unique; otherwise nothing is loaded. A
/// row whose passages fail to parse is rejected and logged, and the rest of
/// the table is still processed.
///
/// # Errors
///
/// [`Error::IdentityViolation`] for a non-integer or duplicate id,
/// [`Error::MissingField`] when the header lacks a required column or the
/// `irrelevant` status column.
pub fn build_comparison(
    book_left: Arc<Book>,
    book_right: Arc<Book>,
    table: MatchTable,
) -> Result<LoadReport> {
    for book in [&book_left, &book_right] {
        if let Some(column) = required_columns(&book.shorthand)
            .into_iter()
            .find(|c| !table.has_column(c))
        {
            return Err(Error::MissingField(column));
        }
    }
    if !table.has_column(IRRELEVANT_COLUMN) {
        return Err(Error::MissingField(IRRELEVANT_COLUMN.to_string()));
    }

    let rows = checked_ids(table.rows)?;

    let mut comparison = BooksComparison::new(Arc::clone(&book_left), Arc::clone(&book_right));
    let mut rejected = Vec::new();
    for (id, record) in rows {
        match build_match(id, record, &book_left, &book_right) {
            Ok(m) => comparison.matches.push(m),
            Err(error) if error.is_record_local() => {
                log::warn!("rejected row {id}: {error}");
                rejected.push(Rejection { row: id, error });
            }
            Err(error) => return Err(error),
        }
    }

    log::info!(
        "loaded {} matches between '{}' and '{}' ({} rejected)",
        comparison.len(),
        book_left.shorthand,
        book_right.shorthand,
        rejected.len()
    );
    Ok(LoadReport {
        comparison,
        rejected,
    })
}

fn checked_ids(rows: Vec<(String, RawRecord)>) -> Result<Vec<(i64, RawRecord)>> {
    let mut seen = HashSet::with_capacity(rows.len());
    rows.into_iter()
        .map(|(raw_id, record)| {
            let id: i64 = raw_id.trim().parse().map_err(|_| {
                Error::identity(format!("row id '{raw_id}' is not an integer"))
            })?;
            if !seen.insert(id) {
                return Err(Error::identity(format!("row id {id} appears more than once")));
            }
            Ok((id, record))
        })
        .collect()
}

/// Build one match from a row.
///
/// # Errors
///
/// Passage construction errors, wrapped with the row id and side key.
pub fn build_match(
    id: i64,
    record: RawRecord,
    left: &Arc<Book>,
    right: &Arc<Book>,
) -> Result<Match> {
    let passage = |book: &Arc<Book>| {
        Passage::from_record(&record, Arc::clone(book))
            .map_err(|e| e.at_row(id.to_string(), book.shorthand.as_str()))
    };
    let left = passage(left)?;
    let right = passage(right)?;

    let meta: BTreeMap<String, String> = record
        .with_prefix(META_PREFIX)
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let status = record.raw(IRRELEVANT_COLUMN).unwrap_or_default().to_string();

    Ok(Match::new(id, left, right)
        .with_meta(meta)
        .with_irrelevant_type(status)
        .with_raw_data(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::table::{read_table_from, ReadOptions};
    use crate::MatchView;

    fn books() -> (Arc<Book>, Arc<Book>) {
        (
            Arc::new(Book::new("l", "Domenico Bernini", "Vita", 1713).with_text("a".repeat(100))),
            Arc::new(Book::new("r", "Baldinucci", "Vita", 1682).with_text("b".repeat(100))),
        )
    }

    const HEADER: &str = "title\n\
idx,id,l.begin,l.end,l.image_number,l.text,person_l,work_l,form_l,content_l,patron_l,\
r.begin,r.end,r.image_number,r.text,person_r,work_r,form_r,content_r,patron_r,place_r,irrelevant,meta.page\n";

    fn table(rows: &str) -> MatchTable {
        read_table_from(format!("{HEADER}{rows}").as_bytes(), ReadOptions::default()).unwrap()
    }

    #[test]
    fn builds_matches_in_order_with_meta() {
        let (l, r) = books();
        let t = table(
            "0,5,1,4,2,aaa,\"Titian?\",,fresco,a_x,,3,9,7,bbb,Titian,,bust,,Urban VIII,Roma,FALSE,12\n\
             1,3,0,1,2,a,,,,,,0,1,7,b,,,,,,,TRUE,13\n",
        );
        let report = build_comparison(l, r, t).unwrap();
        assert!(report.is_complete());
        let ids: Vec<i64> = report.comparison.matches.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![5, 3]);

        let m = &report.comparison.matches[0];
        assert_eq!(m.meta.get("page").map(String::as_str), Some("12"));
        assert!(!m.irrelevant());
        assert!(m.all_persons()[0].is_confident());
        assert_eq!(m.place().unwrap().name(), "Roma");
        assert_eq!(m.raw_data.get("l.text"), Some("aaa"));
        assert!(report.comparison.matches[1].irrelevant());
    }

    #[test]
    fn bad_row_is_rejected_and_others_survive() {
        let (l, r) = books();
        let t = table(
            "0,1,1,4,2,aaa,\"A,,B\",,,,,3,9,7,bbb,,,,,,,FALSE,1\n\
             1,2,1,4,2,aaa,,,,,,3,9,7,bbb,,,,,,,FALSE,1\n\
             2,3,1,400,2,aaa,,,,,,3,9,7,bbb,,,,,,,FALSE,1\n",
        );
        let report = build_comparison(l, r, t).unwrap();
        assert_eq!(report.comparison.len(), 1);
        assert_eq!(report.comparison.matches[0].id, 2);
        assert_eq!(report.rejected.len(), 2);
        assert_eq!(report.rejected[0].row, 1);
        let msg = report.rejected[0].error.to_string();
        assert!(msg.contains("person_l"), "{msg}");
        assert!(msg.contains("A,,B"), "{msg}");
        assert!(matches!(
            &report.rejected[1].error,
            Error::Row { source, .. } if matches!(**source, Error::InvalidSpan { .. })
        ));
    }

    #[test]
    fn non_integer_id_fails_the_load() {
        let (l, r) = books();
        let t = table(
            "0,1,1,4,2,aaa,,,,,,3,9,7,bbb,,,,,,,,\n1,x7,1,4,2,aaa,,,,,,3,9,7,bbb,,,,,,,,\n",
        );
        assert!(matches!(
            build_comparison(l, r, t),
            Err(Error::IdentityViolation(_))
        ));
    }

    #[test]
    fn duplicate_id_fails_the_load() {
        let (l, r) = books();
        let t = table(
            "0,1,1,4,2,aaa,,,,,,3,9,7,bbb,,,,,,,,\n1,1,1,4,2,aaa,,,,,,3,9,7,bbb,,,,,,,,\n",
        );
        assert!(matches!(
            build_comparison(l, r, t),
            Err(Error::IdentityViolation(_))
        ));
    }

    #[test]
    fn missing_column_fails_the_load() {
        let (l, r) = books();
        let t = read_table_from("title\nidx,id,l.begin\n0,1,3\n".as_bytes(), ReadOptions::default())
            .unwrap();
        assert!(matches!(
            build_comparison(l, r, t),
            Err(Error::MissingField(c)) if c == "l.end"
        ));
    }

    #[test]
    fn missing_status_column_fails_the_load() {
        let (l, r) = books();
        let header = HEADER.replace(",irrelevant,", ",irelevant,");
        let t = read_table_from(
            format!("{header}0,1,1,4,2,aaa,,,,,,3,9,7,bbb,,,,,,,FALSE,1\n").as_bytes(),
            ReadOptions::default(),
        )
        .unwrap();
        assert!(matches!(
            build_comparison(l, r, t),
            Err(Error::MissingField(c)) if c == IRRELEVANT_COLUMN
        ));
    }

    #[test]
    fn required_columns_cover_every_annotation() {
        let cols = required_columns("domenico");
        assert!(cols.contains(&"domenico.image_number".to_string()));
        assert!(cols.contains(&"patron_domenico".to_string()));
        assert!(!cols.iter().any(|c| c.starts_with("place_")));
    }
}
