//! # concord-core
//!
//! Core types for concord: the data model shared by every crate in the
//! workspace, and the codecs that turn compact annotation strings into it.
//!
//! This crate provides:
//! - **Mentions and codecs**: `EntityMention`, `decode_mentions`, `decode_list`
//! - **Books**: `Book`, `BookSection`, `SectionKind`
//! - **Passages and matches**: `Passage`, `Narrator`, `Match`, `BooksComparison`
//! - **Raw rows**: `RawRecord`
//!
//! ```text
//! RawRecord ──(codec)──▶ Passage ×2 ──▶ Match ──▶ BooksComparison
//!                           │
//!                           └── Arc<Book> (shared, read-only)
//! ```

#![warn(missing_docs)]

pub mod book;
pub mod codec;
pub mod comparison;
pub mod error;
pub mod mention;
pub mod passage;
pub mod record;

pub use book::{Book, BookSection, SectionKind};
pub use codec::{
    decode_list, decode_mentions, decode_optional_mention, encode_list, encode_mentions,
};
pub use comparison::{BooksComparison, Match, Side};
pub use error::{Error, Result};
pub use mention::EntityMention;
pub use passage::{Excerpt, Narrator, Passage, RawAnnotations};
pub use record::RawRecord;
