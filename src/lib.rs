//! # concord
//!
//! Annotation parsing and cross-book match aggregation for two aligned
//! historical texts.
//!
//! Annotators align passages of two books (here, the two early biographies
//! of Gian Lorenzo Bernini) and tag each side with persons, works, places,
//! patrons, form and content. Annotations arrive as compact strings:
//!
//! ```text
//! person_domenico = "Urban VIII, Titian?"     (? = tentative)
//! form_domenico   = "anecdote, dialogue?"     (? dropped for tags)
//! ```
//!
//! This crate parses them into a typed model and merges both sides of every
//! match into one view.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use concord::prelude::*;
//!
//! let config = ComparisonConfig::load("data/comparison.toml")?;
//! let report = concord::ingest::load_comparison(&config)?;
//!
//! for m in report.comparison.iter_where(|m| !m.irrelevant()) {
//!     let persons: Vec<_> = m.all_persons().iter().map(ToString::to_string).collect();
//!     println!("#{} {}", m.id, persons.join(", "));
//! }
//! # Ok::<(), concord::Error>(())
//! ```
//!
//! ## Crates
//!
//! | Crate | Contents |
//! |-------|----------|
//! | `concord-core` | model, codecs, passage normalizer |
//! | `concord-coalesce` | cross-side merging ([`MatchView`]) |
//! | `concord` | this facade, [`ingest`], [`config`] |

#![warn(missing_docs)]

pub mod config;
pub mod ingest;

pub use concord_core::{
    codec, decode_list, decode_mentions, decode_optional_mention, encode_list, encode_mentions,
    Book, BookSection, BooksComparison, EntityMention, Error, Excerpt, Match, Narrator, Passage,
    RawAnnotations, RawRecord, Result, SectionKind, Side,
};

pub use concord_coalesce::{self as coalesce, reconcile, MatchView};

pub use config::ComparisonConfig;

pub mod prelude {
    //! Commonly used items, re-exported for convenience.
    //!
    //! ```rust
    //! use concord::prelude::*;
    //!
    //! let mentions = decode_mentions(Some("Titian, Raphael?")).unwrap();
    //! assert_eq!(mentions.len(), 2);
    //! ```
    pub use crate::config::ComparisonConfig;
    pub use crate::ingest::{load_comparison, LoadReport};
    pub use concord_coalesce::MatchView;
    pub use concord_core::{
        decode_list, decode_mentions, Book, BookSection, BooksComparison, EntityMention, Error,
        Match, Narrator, Passage, Result, SectionKind, Side,
    };
}
