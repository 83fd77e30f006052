//! Loading a comparison from disk.
//!
//! ```text
//! comparison.toml ─┬─▶ left  book JSON (+ structure JSON) ─▶ Arc<Book>
//!                  ├─▶ right book JSON (+ structure JSON) ─▶ Arc<Book>
//!                  └─▶ match table CSV ─▶ rows ─▶ Match* ─▶ BooksComparison
//! ```
//!
//! Identity problems (non-integer or duplicate row ids) abort the load.
//! Annotation problems only cost the row they occur in; see [`LoadReport`].

pub mod assemble;
pub mod book_data;
pub mod table;

pub use assemble::{build_comparison, build_match, required_columns, LoadReport, Rejection};
pub use book_data::{load_book_data, load_structure, BookStructure, BookText};
pub use table::{read_table, read_table_from, MatchTable, ReadOptions};

use std::sync::Arc;

use crate::config::{BookConfig, ComparisonConfig};
use crate::{Book, Result, Side};

/// Build one book from its configuration: text, then structure if configured.
///
/// # Errors
///
/// IO or JSON errors from the data or structure file.
pub fn load_book(config: &ComparisonConfig, side: Side) -> Result<Book> {
    let BookConfig {
        shorthand,
        author,
        title,
        year,
        data,
        structure,
    } = config.book(side);

    let text = load_book_data(&config.resolve(data))?;
    let book = Book::new(shorthand.as_str(), author.as_str(), title.as_str(), *year)
        .with_text(text.text)
        .with_nb_images(text.nb_images);

    match structure {
        Some(path) => Ok(load_structure(&config.resolve(path))?.apply(book)),
        None => Ok(book),
    }
}

/// Load everything a configuration describes.
///
/// # Errors
///
/// Any error that aborts a load: IO, JSON, CSV, missing columns, identity
/// violations. Per-row failures end up in [`LoadReport::rejected`] instead.
pub fn load_comparison(config: &ComparisonConfig) -> Result<LoadReport> {
    let left = Arc::new(load_book(config, Side::Left)?);
    let right = Arc::new(load_book(config, Side::Right)?);
    let options = ReadOptions {
        skip_rows: config.matches.skip_rows,
        id_column: config.matches.id_column,
    };
    let table = read_table(&config.matches_path(), options)?;
    build_comparison(left, right, table)
}
