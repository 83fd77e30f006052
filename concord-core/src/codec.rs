//! Compact string codecs for passage annotations.
//!
//! Annotators record entities and tags as comma-delimited strings in the
//! match table. Two grammars share one set of conventions:
//!
//! ```text
//! mentions:  "Titian, Raphael?, Urban VIII"
//!             └─ confident  └─ tentative ("?" suffix)
//!
//! tags:      "fresco, portrait?, "
//!             └─ "?" stripped, empty tokens dropped
//! ```
//!
//! The values `""`, `"[]"`, `"[]?"` and `"?"` (and an absent cell) all mean
//! "nothing annotated". Leading and trailing whitespace around the whole value
//! is ignored before that check.
//!
//! Mentions keep the `?` as a confidence flag; tags discard it.

use crate::error::{Error, Result};
use crate::mention::EntityMention;

/// Raw values that stand for "no annotation".
pub const EMPTY_SENTINELS: [&str; 4] = ["", "[]", "[]?", "?"];

/// Suffix marking a tentative annotation.
pub const TENTATIVE_MARKER: char = '?';

const DELIMITER: char = ',';

/// Returns true if the raw value means "nothing annotated".
#[must_use]
pub fn is_absent(raw: Option<&str>) -> bool {
    annotated(raw).is_none()
}

fn annotated(raw: Option<&str>) -> Option<&str> {
    let value = raw?.trim();
    if EMPTY_SENTINELS.contains(&value) {
        None
    } else {
        Some(value)
    }
}

// =============================================================================
// Entity mentions
// =============================================================================

/// Decode a compact mention list.
///
/// Tokens are split on `,` and trimmed. One trailing `?` marks a tentative
/// mention and is stripped; anything left is the name, verbatim (`"A??"` is
/// a tentative `A?`). Output order follows the input and duplicates are kept.
///
/// # Errors
///
/// [`Error::MalformedAnnotation`] when a token is empty (`"A,,B"`) or is a
/// bare marker (`"A, ?"`).
///
/// # Example
///
/// ```
/// use concord_core::codec::decode_mentions;
///
/// let mentions = decode_mentions(Some("Titian, Raphael?")).unwrap();
/// assert_eq!(mentions[0].name(), "Titian");
/// assert!(mentions[0].is_confident());
/// assert!(!mentions[1].is_confident());
///
/// assert!(decode_mentions(Some("[]?")).unwrap().is_empty());
/// ```
pub fn decode_mentions(raw: Option<&str>) -> Result<Vec<EntityMention>> {
    let Some(value) = annotated(raw) else {
        return Ok(Vec::new());
    };
    value
        .split(DELIMITER)
        .map(|token| decode_mention_token(token, value))
        .collect()
}

fn decode_mention_token(token: &str, raw: &str) -> Result<EntityMention> {
    let token = token.trim();
    if token.is_empty() {
        return Err(Error::malformed(raw, "empty token"));
    }
    let (name, confident) = match token.strip_suffix(TENTATIVE_MARKER) {
        Some(name) => (name.trim_end(), false),
        None => (token, true),
    };
    if name.is_empty() {
        return Err(Error::malformed(raw, "confidence marker without a name"));
    }
    Ok(EntityMention::new(name, confident))
}

/// Decode a single-valued mention field (place, patron).
///
/// Only the first token is kept. `"A,B"` yields `A` and drops `B` without
/// complaint; annotators occasionally list several patrons in a column that
/// only holds one.
///
/// # Errors
///
/// Same as [`decode_mentions`]: every token is validated, even the dropped ones.
pub fn decode_optional_mention(raw: Option<&str>) -> Result<Option<EntityMention>> {
    Ok(decode_mentions(raw)?.into_iter().next())
}

/// Encode mentions back into the compact form.
///
/// Inverse of [`decode_mentions`] for names without commas.
#[must_use]
pub fn encode_mentions(mentions: &[EntityMention]) -> String {
    mentions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

// =============================================================================
// Plain tag lists
// =============================================================================

/// Decode a comma-delimited tag list (form, content).
///
/// Empty tokens are dropped and a trailing `?` is stripped and forgotten.
///
/// ```
/// use concord_core::codec::decode_list;
///
/// assert_eq!(decode_list(Some("fresco, fresco?, ")).unwrap(), vec!["fresco", "fresco"]);
/// ```
///
/// # Errors
///
/// Currently infallible: every token is either dropped or kept.
pub fn decode_list(raw: Option<&str>) -> Result<Vec<String>> {
    let Some(value) = annotated(raw) else {
        return Ok(Vec::new());
    };

    let mut tags = Vec::new();
    for token in value.split(DELIMITER).map(str::trim) {
        if token.is_empty() {
            continue;
        }
        let tag = token
            .strip_suffix(TENTATIVE_MARKER)
            .map_or(token, str::trim_end);
        if !tag.is_empty() {
            tags.push(tag.to_string());
        }
    }
    Ok(tags)
}

/// Encode tags back into the compact form.
#[must_use]
pub fn encode_list(tags: &[String]) -> String {
    tags.join(",")
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    // A trailing `?` in a name only survives encoding on tentative mentions:
    // a confident `A?` is written exactly like a tentative `A`.
    fn mention() -> impl Strategy<Value = EntityMention> {
        (
            "[A-Z][a-z\\[\\]]{0,8}( [A-Z][a-z]{0,8}){0,2}",
            any::<bool>(),
            any::<bool>(),
        )
            .prop_map(|(name, confident, marked)| {
                if marked && !confident {
                    EntityMention::tentative(format!("{name}?"))
                } else {
                    EntityMention::new(name, confident)
                }
            })
    }

    proptest! {
        #[test]
        fn mention_roundtrip(mentions in proptest::collection::vec(mention(), 0..6)) {
            let decoded = decode_mentions(Some(&encode_mentions(&mentions))).unwrap();
            prop_assert_eq!(decoded.len(), mentions.len());
            for (d, m) in decoded.iter().zip(&mentions) {
                prop_assert!(d.same_as(m), "{} != {}", d, m);
            }
        }

        #[test]
        fn list_never_yields_empty_or_padded_tags(raw in "[a-z_ ,?\\[\\]']{0,40}") {
            for tag in decode_list(Some(&raw)).unwrap() {
                prop_assert!(!tag.is_empty());
                prop_assert!(!tag.ends_with(' '));
            }
        }

        #[test]
        fn optional_is_head_of_full_decode(raw in "[A-Za-z ?]{1,10}(,[A-Za-z ?]{1,10}){0,3}") {
            match (decode_mentions(Some(&raw)), decode_optional_mention(Some(&raw))) {
                (Ok(all), Ok(first)) => {
                    prop_assert_eq!(all.first().map(|m| m.name().to_string()),
                                    first.map(|m| m.name().to_string()));
                }
                (Err(_), Err(_)) => {}
                _ => prop_assert!(false, "decode and decode_optional disagree on {:?}", raw),
            }
        }
    }
}
