//! # concord-coalesce
//!
//! Merging the annotations of both sides of a match into one view.
//!
//! | View | Rule |
//! |------|------|
//! | persons, works | one entry per name, confident if any side was |
//! | place | left, else right |
//! | patron | present patrons, merged like persons |
//! | form | set union |
//! | relevance | status starts with `FALSE`/`FALSO` → relevant |
//!
//! # Example
//!
//! ```
//! use concord_coalesce::reconcile;
//! use concord_core::decode_mentions;
//!
//! let left = decode_mentions(Some("Titian?, Raphael")).unwrap();
//! let right = decode_mentions(Some("Titian")).unwrap();
//! let merged = reconcile(left.iter().chain(&right));
//! assert!(merged.iter().all(|m| m.is_confident()));
//! ```

#![warn(missing_docs)]

pub mod resolver;
pub mod view;

pub use resolver::{
    common_entities, group_by_name, is_irrelevant, reconcile, resolve_patrons, resolve_place,
    resolve_place_left_only, union_tags, MentionGroup,
};
pub use view::MatchView;
