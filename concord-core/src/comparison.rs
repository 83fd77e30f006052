//! Matches between two books and the comparison that holds them.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::book::Book;
use crate::passage::Passage;
use crate::record::RawRecord;

/// One of the two aligned halves of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// First book of the comparison.
    Left,
    /// Second book of the comparison.
    Right,
}

impl Side {
    /// Both sides, left first.
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Side {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "left" => Ok(Side::Left),
            "right" => Ok(Side::Right),
            other => Err(crate::Error::invalid_input(format!(
                "unknown side '{other}' (expected 'left' or 'right')"
            ))),
        }
    }
}

/// An aligned pair of passages.
///
/// `id` is the identity; two matches are never merged. Views across both
/// sides live in the `concord-coalesce` crate and are computed on demand.
#[derive(Debug, Clone, Serialize)]
pub struct Match {
    /// Row identifier, unique within a comparison.
    pub id: i64,
    /// `meta.*` columns, prefix stripped.
    pub meta: BTreeMap<String, String>,
    /// Passage in the left book.
    pub left: Passage,
    /// Passage in the right book.
    pub right: Passage,
    /// Free-text relevance status as annotated.
    pub irrelevant_type: String,
    /// The source row, verbatim.
    #[serde(skip)]
    pub raw_data: RawRecord,
}

impl Match {
    /// Create a match.
    #[must_use]
    pub fn new(id: i64, left: Passage, right: Passage) -> Self {
        Self {
            id,
            meta: BTreeMap::new(),
            left,
            right,
            irrelevant_type: String::new(),
            raw_data: RawRecord::default(),
        }
    }

    /// Set the relevance status.
    #[must_use]
    pub fn with_irrelevant_type(mut self, status: impl Into<String>) -> Self {
        self.irrelevant_type = status.into();
        self
    }

    /// Set the meta mapping.
    #[must_use]
    pub fn with_meta(mut self, meta: BTreeMap<String, String>) -> Self {
        self.meta = meta;
        self
    }

    /// Attach the source row.
    #[must_use]
    pub fn with_raw_data(mut self, raw: RawRecord) -> Self {
        self.raw_data = raw;
        self
    }

    /// Passage on one side.
    #[must_use]
    pub fn passage(&self, side: Side) -> &Passage {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

/// Two books and the ordered matches between them.
///
/// Match order is the source row order and is preserved by every accessor.
#[derive(Debug, Clone, Serialize)]
pub struct BooksComparison {
    /// Left book.
    pub book_left: Arc<Book>,
    /// Right book.
    pub book_right: Arc<Book>,
    /// Matches in source order.
    pub matches: Vec<Match>,
}

impl BooksComparison {
    /// Create a comparison with no matches.
    #[must_use]
    pub fn new(book_left: Arc<Book>, book_right: Arc<Book>) -> Self {
        Self {
            book_left,
            book_right,
            matches: Vec::new(),
        }
    }

    /// Book on one side.
    #[must_use]
    pub fn book(&self, side: Side) -> &Arc<Book> {
        match side {
            Side::Left => &self.book_left,
            Side::Right => &self.book_right,
        }
    }

    /// Match by id.
    #[must_use]
    pub fn get(&self, id: i64) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    /// Matches satisfying `keep`, in order.
    pub fn iter_where<'a, F>(&'a self, keep: F) -> impl Iterator<Item = &'a Match>
    where
        F: Fn(&Match) -> bool + 'a,
    {
        self.matches.iter().filter(move |m| keep(m))
    }

    /// Number of matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Whether there are no matches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passage::RawAnnotations;

    fn passage(book: &Arc<Book>, image: i64) -> Passage {
        Passage::new(Arc::clone(book), 0, 2, image, "", &RawAnnotations::default()).unwrap()
    }

    fn comparison() -> BooksComparison {
        let l = Arc::new(Book::new("l", "L", "T", 1713).with_text("abcdef"));
        let r = Arc::new(Book::new("r", "R", "T", 1682).with_text("ghijkl"));
        let mut c = BooksComparison::new(Arc::clone(&l), Arc::clone(&r));
        for (id, image) in [(7, 3), (2, 1), (9, 8)] {
            c.matches.push(Match::new(id, passage(&l, image), passage(&r, image)));
        }
        c
    }

    #[test]
    fn lookup_and_filter_preserve_order() {
        let c = comparison();
        assert_eq!(c.get(2).unwrap().left.image_number(), 1);
        assert!(c.get(3).is_none());
        let ids: Vec<i64> = c.iter_where(|m| m.left.image_number() > 1).map(|m| m.id).collect();
        assert_eq!(ids, vec![7, 9]);
    }

    #[test]
    fn passages_share_the_book() {
        let c = comparison();
        assert!(Arc::ptr_eq(c.matches[0].left.book(), c.book(Side::Left)));
        assert!(Arc::ptr_eq(c.matches[2].right.book(), &c.book_right));
        assert_eq!(Arc::strong_count(&c.book_left), 4);
    }

    #[test]
    fn side_roundtrip() {
        for side in Side::BOTH {
            assert_eq!(side.as_str().parse::<Side>().unwrap(), side);
        }
        assert!("middle".parse::<Side>().is_err());
    }
}
