//! Passages: one side of a match, with its annotations parsed.

use serde::{Deserialize, Serialize, Serializer};
use std::sync::Arc;

use crate::book::Book;
use crate::codec::{decode_list, decode_mentions, decode_optional_mention};
use crate::error::{Error, Result};
use crate::mention::EntityMention;
use crate::record::RawRecord;

// =============================================================================
// Narrator
// =============================================================================

/// Inferred voice of a passage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Narrator {
    /// The book's own author (`a_` content tags).
    Author,
    /// Bernini himself, as the source of the account (`b_` content tags).
    Bernini,
    /// Someone else (`c_` content tags).
    ThirdParty,
}

impl Narrator {
    /// Classify a single content tag by its prefix.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        if tag.starts_with("a_") {
            Some(Narrator::Author)
        } else if tag.starts_with("b_") {
            Some(Narrator::Bernini)
        } else if tag.starts_with("c_") {
            Some(Narrator::ThirdParty)
        } else {
            None
        }
    }

    /// Display label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Narrator::Author => "AUTHOR",
            Narrator::Bernini => "BERNINI",
            Narrator::ThirdParty => "THIRD_PARTY",
        }
    }
}

impl std::fmt::Display for Narrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Raw annotations
// =============================================================================

/// Unparsed annotation cells of one side, as found in the source.
#[derive(Debug, Clone, Default)]
pub struct RawAnnotations<'a> {
    /// Compact mention list of persons.
    pub persons: Option<&'a str>,
    /// Compact mention list of works.
    pub works: Option<&'a str>,
    /// Form tags.
    pub form: Option<&'a str>,
    /// Content tags.
    pub content: Option<&'a str>,
    /// Single patron mention.
    pub patron: Option<&'a str>,
    /// Single place mention.
    pub place: Option<&'a str>,
}

/// Parsed annotation fields, before they are attached to a span.
#[derive(Debug, Clone, Default)]
struct Annotations {
    persons: Vec<EntityMention>,
    works: Vec<EntityMention>,
    form: Vec<String>,
    content: Vec<String>,
    patron: Option<EntityMention>,
    place: Option<EntityMention>,
}

impl Annotations {
    /// Parse every field. `field` maps an annotation kind to its column name
    /// so that errors say where the bad value came from.
    fn parse(raw: &RawAnnotations<'_>, field: impl Fn(&str) -> String) -> Result<Self> {
        Ok(Self {
            persons: decode_mentions(raw.persons).map_err(|e| e.in_field(&field("person")))?,
            works: decode_mentions(raw.works).map_err(|e| e.in_field(&field("work")))?,
            form: decode_list(raw.form).map_err(|e| e.in_field(&field("form")))?,
            content: decode_list(raw.content).map_err(|e| e.in_field(&field("content")))?,
            patron: decode_optional_mention(raw.patron)
                .map_err(|e| e.in_field(&field("patron")))?,
            place: decode_optional_mention(raw.place).map_err(|e| e.in_field(&field("place")))?,
        })
    }
}

// =============================================================================
// Passage
// =============================================================================

/// One side of a match: a character span of a book with its annotations.
///
/// Annotation fields are parsed exactly once, here. The book is shared,
/// never owned.
#[derive(Debug, Clone, Serialize)]
pub struct Passage {
    #[serde(serialize_with = "book_shorthand")]
    book: Arc<Book>,
    begin_c: i64,
    end_c: i64,
    image_number: i64,
    text: String,
    persons: Vec<EntityMention>,
    works: Vec<EntityMention>,
    form: Vec<String>,
    content: Vec<String>,
    patron: Option<EntityMention>,
    place: Option<EntityMention>,
}

fn book_shorthand<S: Serializer>(
    book: &Arc<Book>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&book.shorthand)
}

impl Passage {
    /// Build a passage from raw annotation strings.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSpan`] when `begin_c..end_c` does not lie inside the
    /// book text, [`Error::MalformedAnnotation`] when a raw annotation does
    /// not parse.
    pub fn new(
        book: Arc<Book>,
        begin_c: i64,
        end_c: i64,
        image_number: i64,
        text: impl Into<String>,
        raw: &RawAnnotations<'_>,
    ) -> Result<Self> {
        check_span(&book, begin_c, end_c)?;
        let annotations = Annotations::parse(raw, |kind| kind.to_string())?;
        Ok(Self::assemble(book, begin_c, end_c, image_number, text.into(), annotations))
    }

    /// Build the passage of `book`'s side from a match-table row.
    ///
    /// Columns are keyed by the book shorthand: `{key}.begin`, `{key}.end`,
    /// `{key}.image_number`, `{key}.text`, `person_{key}`, `work_{key}`,
    /// `form_{key}`, `content_{key}`, `patron_{key}` and, optionally,
    /// `place_{key}`.
    ///
    /// # Errors
    ///
    /// [`Error::MissingField`] for an absent required column,
    /// [`Error::InvalidInput`] for non-integer offsets, plus the errors of
    /// [`Passage::new`] with the column name attached.
    pub fn from_record(record: &RawRecord, book: Arc<Book>) -> Result<Self> {
        let key = book.shorthand.clone();
        let begin_c = record.require_int(&format!("{key}.begin"))?;
        let end_c = record.require_int(&format!("{key}.end"))?;
        let image_number = record.require_int(&format!("{key}.image_number"))?;
        let text = record
            .require(&format!("{key}.text"))?
            .unwrap_or_default()
            .to_string();
        check_span(&book, begin_c, end_c)?;

        let column = |kind: &str| format!("{kind}_{key}");
        let raw = RawAnnotations {
            persons: record.require(&column("person"))?,
            works: record.require(&column("work"))?,
            form: record.require(&column("form"))?,
            content: record.require(&column("content"))?,
            patron: record.require(&column("patron"))?,
            place: record.get(&column("place")),
        };
        let annotations = Annotations::parse(&raw, column)?;
        Ok(Self::assemble(book, begin_c, end_c, image_number, text, annotations))
    }

    fn assemble(
        book: Arc<Book>,
        begin_c: i64,
        end_c: i64,
        image_number: i64,
        text: String,
        a: Annotations,
    ) -> Self {
        Self {
            book,
            begin_c,
            end_c,
            image_number,
            text,
            persons: a.persons,
            works: a.works,
            form: a.form,
            content: a.content,
            patron: a.patron,
            place: a.place,
        }
    }

    /// The book this passage belongs to.
    #[must_use]
    pub fn book(&self) -> &Arc<Book> {
        &self.book
    }

    /// Start character offset in the book text.
    #[must_use]
    pub fn begin_c(&self) -> i64 {
        self.begin_c
    }

    /// End character offset in the book text.
    #[must_use]
    pub fn end_c(&self) -> i64 {
        self.end_c
    }

    /// Scanned image the passage appears on.
    #[must_use]
    pub fn image_number(&self) -> i64 {
        self.image_number
    }

    /// Passage text as recorded in the match table.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Persons mentioned.
    #[must_use]
    pub fn persons(&self) -> &[EntityMention] {
        &self.persons
    }

    /// Works mentioned.
    #[must_use]
    pub fn works(&self) -> &[EntityMention] {
        &self.works
    }

    /// Form tags.
    #[must_use]
    pub fn form(&self) -> &[String] {
        &self.form
    }

    /// Content tags.
    #[must_use]
    pub fn content(&self) -> &[String] {
        &self.content
    }

    /// Patron, if annotated.
    #[must_use]
    pub fn patron(&self) -> Option<&EntityMention> {
        self.patron.as_ref()
    }

    /// Place, if annotated.
    #[must_use]
    pub fn place(&self) -> Option<&EntityMention> {
        self.place.as_ref()
    }

    /// Narrator from the first content tag carrying a narrator prefix.
    ///
    /// Later tags are not consulted, even if they disagree.
    #[must_use]
    pub fn narrator(&self) -> Option<Narrator> {
        self.content.iter().find_map(|tag| Narrator::from_tag(tag))
    }

    /// The passage span with up to `context` characters on either side,
    /// taken from the book text.
    #[must_use]
    pub fn excerpt(&self, context: usize) -> Excerpt {
        let begin = usize::try_from(self.begin_c).unwrap_or(0);
        let end = usize::try_from(self.end_c).unwrap_or(0);
        let len = self.book.char_len();
        Excerpt {
            before: self.book.slice_chars(begin.saturating_sub(context), begin),
            span: self.book.slice_chars(begin, end),
            after: self
                .book
                .slice_chars(end, len.saturating_sub(1).min(end.saturating_add(context))),
        }
    }
}

/// A passage span with surrounding context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Excerpt {
    /// Context before the span.
    pub before: String,
    /// The span itself.
    pub span: String,
    /// Context after the span.
    pub after: String,
}

fn check_span(book: &Book, begin_c: i64, end_c: i64) -> Result<()> {
    let len = book.char_len();
    let inside = |c: i64| usize::try_from(c).map_or(false, |c| c < len);
    if begin_c <= end_c && inside(begin_c) && inside(end_c) {
        Ok(())
    } else {
        Err(Error::InvalidSpan {
            book: book.shorthand.clone(),
            begin: begin_c,
            end: end_c,
            len,
        })
    }
}
