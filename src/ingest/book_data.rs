//! Book text and structure files.
//!
//! Text files hold the OCR pages and the concatenated text:
//!
//! ```json
//! { "pages": [ ... ], "text": "..." }
//! ```
//!
//! Structure files hold pagination and the two section sequences:
//!
//! ```json
//! {
//!   "pageimage_offset": 6,
//!   "page_number_max": 180,
//!   "chapters": [ { "page_number_begin": 1, ... , "name": "Capitolo I" } ],
//!   "patrons":  [ ... ]
//! }
//! ```

use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{Book, BookSection, Result, SectionKind};

#[derive(Debug, Deserialize)]
struct BookData {
    pages: Vec<serde_json::Value>,
    text: String,
}

/// Text of a book and its number of scanned images (one per page entry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookText {
    /// Number of scanned images.
    pub nb_images: i64,
    /// Full text.
    pub text: String,
}

/// Read a book text file.
///
/// # Errors
///
/// IO or JSON errors.
pub fn load_book_data(path: &Path) -> Result<BookText> {
    let reader = BufReader::new(File::open(path)?);
    let data: BookData = serde_json::from_reader(reader)?;
    log::debug!(
        "{}: {} pages, {} bytes of text",
        path.display(),
        data.pages.len(),
        data.text.len()
    );
    Ok(BookText {
        nb_images: i64::try_from(data.pages.len()).unwrap_or(i64::MAX),
        text: data.text,
    })
}

/// Pagination and sections of one book.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookStructure {
    /// Offset between image numbers and printed page numbers.
    pub pageimage_offset: i64,
    /// Highest printed page number.
    pub page_number_max: i64,
    /// Chapters in order.
    #[serde(default)]
    pub chapters: Vec<BookSection>,
    /// Patron spans in order.
    #[serde(default)]
    pub patrons: Vec<BookSection>,
}

impl BookStructure {
    /// Attach this structure to `book`, and only to it.
    #[must_use]
    pub fn apply(self, book: Book) -> Book {
        book.with_pagination(self.page_number_max, self.pageimage_offset)
            .with_sections(SectionKind::Chapters, self.chapters)
            .with_sections(SectionKind::Patrons, self.patrons)
    }
}

/// Read a book structure file.
///
/// # Errors
///
/// IO or JSON errors.
pub fn load_structure(path: &Path) -> Result<BookStructure> {
    let reader = BufReader::new(File::open(path)?);
    let structure: BookStructure = serde_json::from_reader(reader)?;
    log::debug!(
        "{}: {} chapters, {} patron sections",
        path.display(),
        structure.chapters.len(),
        structure.patrons.len()
    );
    Ok(structure)
}
