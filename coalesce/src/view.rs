//! Derived views of a match across both sides.

use concord_core::{EntityMention, Match, Result};

use crate::resolver;

/// Aggregated, read-only views of a [`Match`].
///
/// Each method recomputes its value from `left` and `right` on every call.
/// Memoize at the call site if that matters.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use concord_coalesce::MatchView;
/// use concord_core::{Book, Match, Passage, RawAnnotations};
///
/// let book = Arc::new(Book::new("b", "Baldinucci", "Vita", 1682).with_text("Roma, 1623."));
/// let left = Passage::new(Arc::clone(&book), 0, 4, 1, "Roma", &RawAnnotations {
///     persons: Some("Urban VIII?"),
///     ..Default::default()
/// }).unwrap();
/// let right = Passage::new(book, 0, 4, 1, "Roma", &RawAnnotations {
///     persons: Some("Urban VIII"),
///     place: Some("Rome"),
///     ..Default::default()
/// }).unwrap();
///
/// let m = Match::new(1, left, right).with_irrelevant_type("FALSE");
/// assert!(!m.irrelevant());
/// assert!(m.all_persons()[0].is_confident());
/// assert_eq!(m.place().unwrap().name(), "Rome");
/// ```
pub trait MatchView {
    /// Whether the annotated status marks the match as irrelevant.
    fn irrelevant(&self) -> bool;

    /// Persons of both sides, one entry per name, confidence OR-merged.
    fn all_persons(&self) -> Vec<EntityMention>;

    /// Works of both sides, one entry per name, confidence OR-merged.
    fn all_works(&self) -> Vec<EntityMention>;

    /// Place, left side first.
    fn place(&self) -> Option<&EntityMention>;

    /// Patrons of both sides, confidence OR-merged.
    fn patron(&self) -> Vec<EntityMention>;

    /// Union of form tags.
    fn form(&self) -> Vec<String>;

    /// Union of form tags; see [`resolver::union_content`].
    fn content(&self) -> Vec<String>;

    /// Mentions common to both sides. Not implemented.
    ///
    /// # Errors
    ///
    /// Always `Error::NotImplemented`.
    fn common_entities(&self) -> Result<Vec<EntityMention>>;
}

impl MatchView for Match {
    fn irrelevant(&self) -> bool {
        resolver::is_irrelevant(&self.irrelevant_type)
    }

    fn all_persons(&self) -> Vec<EntityMention> {
        resolver::all_persons(&self.left, &self.right)
    }

    fn all_works(&self) -> Vec<EntityMention> {
        resolver::all_works(&self.left, &self.right)
    }

    fn place(&self) -> Option<&EntityMention> {
        resolver::resolve_place(&self.left, &self.right)
    }

    fn patron(&self) -> Vec<EntityMention> {
        resolver::resolve_patrons(&self.left, &self.right)
    }

    fn form(&self) -> Vec<String> {
        resolver::union_form(&self.left, &self.right)
    }

    fn content(&self) -> Vec<String> {
        resolver::union_content(&self.left, &self.right)
    }

    fn common_entities(&self) -> Result<Vec<EntityMention>> {
        resolver::common_entities(&self.left, &self.right)
    }
}
