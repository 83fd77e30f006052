//! Cross-side annotation merging.
//!
//! Every function here is pure: it reads the two passages of a match and
//! returns a new value. Nothing is cached and the passages are never touched.

use concord_core::{EntityMention, Error, Passage, Result};
use std::collections::HashMap;

// =============================================================================
// Relevance
// =============================================================================

/// Status prefixes that mark a match as relevant ("not irrelevant").
///
/// The annotation sheet was filled in both English and Italian.
pub const NOT_IRRELEVANT_MARKERS: [&str; 2] = ["FALSE", "FALSO"];

/// Classify a free-text relevance status.
///
/// A status starting with `FALSE` or `FALSO` (case-sensitive) means the match
/// is relevant. Anything else, including an empty status, counts as
/// irrelevant.
#[must_use]
pub fn is_irrelevant(status: &str) -> bool {
    !NOT_IRRELEVANT_MARKERS
        .iter()
        .any(|marker| status.starts_with(*marker))
}

// =============================================================================
// Mentions
// =============================================================================

/// A name and every confidence flag observed for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionGroup {
    /// Entity name shared by the group.
    pub name: String,
    /// Confidence of each occurrence, in encounter order.
    pub confidences: Vec<bool>,
}

impl MentionGroup {
    /// OR over the group: confident if any occurrence was.
    #[must_use]
    pub fn reduce(&self) -> EntityMention {
        EntityMention::new(self.name.clone(), self.confidences.iter().any(|&c| c))
    }
}

/// Group mentions by name, groups ordered by first occurrence.
#[must_use]
pub fn group_by_name<'a, I>(mentions: I) -> Vec<MentionGroup>
where
    I: IntoIterator<Item = &'a EntityMention>,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<MentionGroup> = Vec::new();
    for mention in mentions {
        let slot = *index.entry(mention.name()).or_insert_with(|| {
            groups.push(MentionGroup {
                name: mention.name().to_string(),
                confidences: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].confidences.push(mention.is_confident());
    }
    groups
}

/// Merge mentions into one entry per name.
///
/// A name is confident if any of its occurrences is, and tentative only if
/// all of them are. This is neither a vote nor a side precedence.
///
/// ```
/// use concord_coalesce::reconcile;
/// use concord_core::EntityMention;
///
/// let left = [EntityMention::confident("Titian")];
/// let right = [EntityMention::tentative("Titian"), EntityMention::tentative("Raphael")];
/// let merged = reconcile(left.iter().chain(&right));
///
/// assert_eq!(merged.len(), 2);
/// assert!(merged[0].is_confident());
/// assert!(!merged[1].is_confident());
/// ```
#[must_use]
pub fn reconcile<'a, I>(mentions: I) -> Vec<EntityMention>
where
    I: IntoIterator<Item = &'a EntityMention>,
{
    group_by_name(mentions)
        .iter()
        .map(MentionGroup::reduce)
        .collect()
}

/// Union of the persons of both passages.
#[must_use]
pub fn all_persons(left: &Passage, right: &Passage) -> Vec<EntityMention> {
    reconcile(left.persons().iter().chain(right.persons()))
}

/// Union of the works of both passages.
#[must_use]
pub fn all_works(left: &Passage, right: &Passage) -> Vec<EntityMention> {
    reconcile(left.works().iter().chain(right.works()))
}

/// Place of the match: left if annotated, otherwise right.
#[must_use]
pub fn resolve_place<'a>(left: &'a Passage, right: &'a Passage) -> Option<&'a EntityMention> {
    left.place().or_else(|| right.place())
}

/// Place under the earlier rule, which only ever read the left side.
#[must_use]
pub fn resolve_place_left_only<'a>(
    left: &'a Passage,
    _right: &'a Passage,
) -> Option<&'a EntityMention> {
    left.place()
}

/// Patrons of both sides, merged like persons.
///
/// A patron annotated on one side only keeps that side's confidence.
#[must_use]
pub fn resolve_patrons(left: &Passage, right: &Passage) -> Vec<EntityMention> {
    reconcile(left.patron().into_iter().chain(right.patron()))
}

/// Mentions common to both sides.
///
/// # Errors
///
/// Always [`Error::NotImplemented`].
pub fn common_entities(_left: &Passage, _right: &Passage) -> Result<Vec<EntityMention>> {
    Err(Error::not_implemented("common entities between both sides of a match"))
}

// =============================================================================
// Tags
// =============================================================================

/// Set union of two tag lists, first-occurrence order.
#[must_use]
pub fn union_tags(a: &[String], b: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(a.len() + b.len());
    for tag in a.iter().chain(b) {
        if !out.contains(tag) {
            out.push(tag.clone());
        }
    }
    out
}

/// Form tags of the match.
#[must_use]
pub fn union_form(left: &Passage, right: &Passage) -> Vec<String> {
    union_tags(left.form(), right.form())
}

/// Content tags of the match.
///
/// Reports the union of the *form* tags of both sides, identical to
/// [`union_form`]. Per-side content tags remain available on each passage.
#[must_use]
pub fn union_content(left: &Passage, right: &Passage) -> Vec<String> {
    union_tags(left.form(), right.form())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relevance_markers() {
        assert!(!is_irrelevant("FALSE - reviewed"));
        assert!(!is_irrelevant("FALSO"));
        assert!(!is_irrelevant("FALSE"));
        assert!(is_irrelevant("TRUE"));
        assert!(is_irrelevant("VERO"));
        // Empty status is treated as irrelevant.
        assert!(is_irrelevant(""));
        // Case-sensitive.
        assert!(is_irrelevant("false"));
        assert!(is_irrelevant(" FALSE"));
    }

    #[test]
    fn confidence_is_or_reduced() {
        let merged = reconcile(&[
            EntityMention::confident("X"),
            EntityMention::tentative("X"),
        ]);
        assert_eq!(merged.len(), 1);
        assert!(merged[0].is_confident());

        let merged = reconcile(&[
            EntityMention::tentative("X"),
            EntityMention::tentative("X"),
        ]);
        assert!(merged[0].same_as(&EntityMention::tentative("X")));

        let merged = reconcile(&[
            EntityMention::tentative("X"),
            EntityMention::tentative("X"),
            EntityMention::confident("X"),
        ]);
        assert!(merged[0].is_confident());
    }

    #[test]
    fn groups_follow_first_occurrence() {
        let mentions = [
            EntityMention::tentative("B"),
            EntityMention::confident("A"),
            EntityMention::confident("B"),
        ];
        let groups = group_by_name(&mentions);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "B");
        assert_eq!(groups[0].confidences, vec![false, true]);
        assert_eq!(groups[1].confidences, vec![true]);
    }

    #[test]
    fn tag_union_collapses_duplicates() {
        let a = vec!["fresco".to_string(), "bust".to_string(), "fresco".to_string()];
        let b = vec!["bust".to_string(), "altar".to_string()];
        assert_eq!(union_tags(&a, &b), vec!["fresco", "bust", "altar"]);
        assert!(union_tags(&[], &[]).is_empty());
    }

    #[test]
    fn reconcile_of_nothing_is_empty() {
        assert!(reconcile(&[]).is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn mentions() -> impl Strategy<Value = Vec<EntityMention>> {
        proptest::collection::vec(
            ("[A-E]", any::<bool>()).prop_map(|(n, c)| EntityMention::new(n, c)),
            0..12,
        )
    }

    proptest! {
        #[test]
        fn one_entry_per_distinct_name(ms in mentions()) {
            let merged = reconcile(&ms);
            let distinct: HashSet<&str> = ms.iter().map(EntityMention::name).collect();
            prop_assert_eq!(merged.len(), distinct.len());
            for m in &merged {
                let any_confident = ms.iter().any(|o| o.name() == m.name() && o.is_confident());
                prop_assert_eq!(m.is_confident(), any_confident);
            }
        }

        #[test]
        fn reconcile_is_order_insensitive_on_confidence(ms in mentions()) {
            let forward = reconcile(&ms);
            let backward = reconcile(ms.iter().rev());
            for m in &forward {
                let other = backward.iter().find(|o| o.name() == m.name()).unwrap();
                prop_assert!(m.same_as(other));
            }
        }
    }
}
