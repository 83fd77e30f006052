//! Books and their structural sections.
//!
//! A [`Book`] is built once when a comparison is loaded and then frozen
//! behind an `Arc`, shared by every passage that cites it. Structure comes
//! in two kinds of section sequences, chapters and patron spans, each
//! addressed by image-number range.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::{Error, Result};

// =============================================================================
// Sections
// =============================================================================

/// Kind of structural section sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    /// Chapters of the book.
    Chapters,
    /// Spans of text devoted to one patron.
    Patrons,
}

impl SectionKind {
    /// All kinds, in display order.
    pub const ALL: [SectionKind; 2] = [SectionKind::Chapters, SectionKind::Patrons];

    /// Key used in structure files and by consumers.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Chapters => "chapters",
            SectionKind::Patrons => "patrons",
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "chapters" => Ok(SectionKind::Chapters),
            "patrons" => Ok(SectionKind::Patrons),
            other => Err(Error::invalid_input(format!(
                "unknown section kind '{other}' (expected 'chapters' or 'patrons')"
            ))),
        }
    }
}

/// One labelled span of a book, addressed by page and image numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSection {
    /// First printed page.
    pub page_number_begin: i64,
    /// Last printed page.
    pub page_number_end: i64,
    /// First scanned image.
    pub image_number_begin: i64,
    /// Last scanned image.
    pub image_number_end: i64,
    /// Display name.
    pub name: String,
    /// Short identifier for the name, may be empty.
    #[serde(default)]
    pub name_id: String,
    /// Optional numeric id.
    #[serde(default)]
    pub id: Option<i64>,
}

impl BookSection {
    /// Inclusive image-number range test.
    #[must_use]
    pub fn contains_image(&self, image_number: i64) -> bool {
        (self.image_number_begin..=self.image_number_end).contains(&image_number)
    }

    /// Label for display: `name_id` when set, otherwise `name`.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.name_id.is_empty() {
            &self.name
        } else {
            &self.name_id
        }
    }
}

// =============================================================================
// Book
// =============================================================================

/// One of the two books of a comparison.
#[derive(Debug, Clone, Serialize)]
pub struct Book {
    /// Short key, also used as the column suffix in the match table.
    pub shorthand: String,
    /// Author name.
    pub author: String,
    /// Title.
    pub title: String,
    /// Publication year.
    pub year: i32,
    /// Number of scanned images.
    pub nb_images: i64,
    /// Highest printed page number.
    pub nb_pages: i64,
    /// Offset between image numbers and printed page numbers.
    pub pageimage_offset: i64,
    /// Full text.
    #[serde(skip)]
    pub text: String,
    #[serde(skip)]
    char_len: usize,
    sections_sequences: BTreeMap<SectionKind, Vec<BookSection>>,
}

impl Book {
    /// Create a book with no text and no structure.
    #[must_use]
    pub fn new(
        shorthand: impl Into<String>,
        author: impl Into<String>,
        title: impl Into<String>,
        year: i32,
    ) -> Self {
        Self {
            shorthand: shorthand.into(),
            author: author.into(),
            title: title.into(),
            year,
            nb_images: 0,
            nb_pages: 0,
            pageimage_offset: 0,
            text: String::new(),
            char_len: 0,
            sections_sequences: BTreeMap::new(),
        }
    }

    /// Set the full text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self.char_len = self.text.chars().count();
        self
    }

    /// Set the number of scanned images.
    #[must_use]
    pub fn with_nb_images(mut self, nb_images: i64) -> Self {
        self.nb_images = nb_images;
        self
    }

    /// Set page count and image/page offset.
    #[must_use]
    pub fn with_pagination(mut self, nb_pages: i64, pageimage_offset: i64) -> Self {
        self.nb_pages = nb_pages;
        self.pageimage_offset = pageimage_offset;
        self
    }

    /// Set the section sequence of one kind, replacing any previous one.
    #[must_use]
    pub fn with_sections(mut self, kind: SectionKind, sections: Vec<BookSection>) -> Self {
        self.sections_sequences.insert(kind, sections);
        self
    }

    /// `"{author}, {year}"`.
    #[must_use]
    pub fn short_descriptor(&self) -> String {
        format!("{}, {}", self.author, self.year)
    }

    /// Length of the text in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    /// Sections of one kind, empty when the book has no such structure.
    #[must_use]
    pub fn sections(&self, kind: SectionKind) -> &[BookSection] {
        self.sections_sequences
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// All section sequences keyed by kind.
    #[must_use]
    pub fn sections_sequences(&self) -> &BTreeMap<SectionKind, Vec<BookSection>> {
        &self.sections_sequences
    }

    /// First section of `kind` whose image range contains `image_number`.
    #[must_use]
    pub fn section_at(&self, kind: SectionKind, image_number: i64) -> Option<&BookSection> {
        self.sections(kind)
            .iter()
            .find(|s| s.contains_image(image_number))
    }

    /// Characters `begin..end` of the text, clamped to its bounds.
    #[must_use]
    pub fn slice_chars(&self, begin: usize, end: usize) -> String {
        let end = end.min(self.char_len);
        if begin >= end {
            return String::new();
        }
        self.text.chars().skip(begin).take(end - begin).collect()
    }
}
