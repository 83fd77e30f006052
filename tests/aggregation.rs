//! Merging both sides of a match, through the public facade.
//!
//! Passages are built directly against small in-memory books; the ingest
//! path is covered in `ingest.rs`.

use std::sync::Arc;

use concord::{
    coalesce, decode_list, decode_mentions, decode_optional_mention, encode_mentions, Book,
    BooksComparison, EntityMention, Error, Match, MatchView, Narrator, Passage, RawAnnotations,
};

fn book(shorthand: &str) -> Arc<Book> {
    Arc::new(Book::new(shorthand, "Anon", "Vita", 1700).with_text("x".repeat(64)))
}

fn passage(book: &Arc<Book>, raw: RawAnnotations<'_>) -> Passage {
    Passage::new(Arc::clone(book), 0, 10, 1, "x", &raw).unwrap()
}

fn pair(left: RawAnnotations<'_>, right: RawAnnotations<'_>) -> Match {
    let (l, r) = (book("l"), book("r"));
    Match::new(1, passage(&l, left), passage(&r, right))
}

fn confidences(mentions: &[EntityMention]) -> Vec<(&str, bool)> {
    mentions.iter().map(|m| (m.name(), m.is_confident())).collect()
}

// =============================================================================
// Codecs
// =============================================================================

#[test]
fn sentinels_all_mean_no_mentions() {
    for raw in [None, Some(""), Some("[]"), Some("[]?"), Some("?")] {
        assert!(decode_mentions(raw).unwrap().is_empty(), "{raw:?}");
        assert!(decode_list(raw).unwrap().is_empty(), "{raw:?}");
        assert!(decode_optional_mention(raw).unwrap().is_none(), "{raw:?}");
    }
}

#[test]
fn question_mark_marks_tentative() {
    let tentative = decode_mentions(Some("Titian?")).unwrap();
    assert_eq!(confidences(&tentative), vec![("Titian", false)]);
    let confident = decode_mentions(Some("Titian")).unwrap();
    assert_eq!(confidences(&confident), vec![("Titian", true)]);
}

#[test]
fn optional_decode_keeps_only_first_token() {
    let place = decode_optional_mention(Some("A,B")).unwrap().unwrap();
    assert_eq!(place.name(), "A");
    assert!(place.is_confident());
}

#[test]
fn list_decode_drops_marker_and_empty_tokens() {
    assert_eq!(
        decode_list(Some("fresco, fresco?, ")).unwrap(),
        vec!["fresco".to_string(), "fresco".to_string()]
    );
}

#[test]
fn mention_encoding_round_trips_with_confidence() {
    let mentions = vec![
        EntityMention::confident("Urban VIII"),
        EntityMention::tentative("Titian"),
        EntityMention::confident("Raphael"),
    ];
    let decoded = decode_mentions(Some(&encode_mentions(&mentions))).unwrap();
    assert_eq!(confidences(&decoded), confidences(&mentions));
}

#[test]
fn marker_and_brackets_inside_names_survive() {
    let mentions = vec![
        EntityMention::tentative("A?"),
        EntityMention::confident("[Titian]"),
    ];
    let encoded = encode_mentions(&mentions);
    assert_eq!(encoded, "A??,[Titian]");
    let decoded = decode_mentions(Some(&encoded)).unwrap();
    assert_eq!(confidences(&decoded), vec![("A?", false), ("[Titian]", true)]);
    assert_eq!(
        decode_list(Some("['fresco']")).unwrap(),
        vec!["['fresco']".to_string()]
    );
}

#[test]
fn malformed_value_is_reported_with_the_value() {
    let err = decode_mentions(Some("A,,B")).unwrap_err();
    assert!(matches!(err, Error::MalformedAnnotation { .. }));
    assert!(err.to_string().contains("A,,B"), "{err}");
}

// =============================================================================
// Match views
// =============================================================================

#[test]
fn person_confidence_is_or_across_sides() {
    let m = pair(
        RawAnnotations {
            persons: Some("X"),
            ..Default::default()
        },
        RawAnnotations {
            persons: Some("X?"),
            ..Default::default()
        },
    );
    assert_eq!(confidences(&m.all_persons()), vec![("X", true)]);

    let m = pair(
        RawAnnotations {
            persons: Some("X?"),
            ..Default::default()
        },
        RawAnnotations {
            persons: Some("X?"),
            ..Default::default()
        },
    );
    assert_eq!(confidences(&m.all_persons()), vec![("X", false)]);
}

#[test]
fn union_has_one_entry_per_name() {
    let m = pair(
        RawAnnotations {
            works: Some("Baldacchino?, Apollo and Daphne"),
            ..Default::default()
        },
        RawAnnotations {
            works: Some("Apollo and Daphne?, Baldacchino?"),
            ..Default::default()
        },
    );
    let works = m.all_works();
    assert_eq!(works.len(), 2);
    let baldacchino = works.iter().find(|w| w.name() == "Baldacchino").unwrap();
    assert!(!baldacchino.is_confident());
    let apollo = works.iter().find(|w| w.name() == "Apollo and Daphne").unwrap();
    assert!(apollo.is_confident());
}

#[test]
fn place_prefers_left_and_falls_back_to_right() {
    let m = pair(
        RawAnnotations::default(),
        RawAnnotations {
            place: Some("Paris"),
            ..Default::default()
        },
    );
    assert_eq!(m.place().map(EntityMention::name), Some("Paris"));

    let m = pair(
        RawAnnotations {
            place: Some("Roma"),
            ..Default::default()
        },
        RawAnnotations {
            place: Some("Paris"),
            ..Default::default()
        },
    );
    assert_eq!(m.place().map(EntityMention::name), Some("Roma"));
}

#[test]
fn left_only_place_rule_has_no_fallback() {
    let m = pair(
        RawAnnotations::default(),
        RawAnnotations {
            place: Some("Paris"),
            ..Default::default()
        },
    );
    assert!(coalesce::resolve_place_left_only(&m.left, &m.right).is_none());
}

#[test]
fn relevance_follows_status_prefix() {
    let status = |s: &str| {
        pair(RawAnnotations::default(), RawAnnotations::default()).with_irrelevant_type(s)
    };
    assert!(!status("FALSE - reviewed").irrelevant());
    assert!(!status("FALSO").irrelevant());
    assert!(status("TRUE").irrelevant());
    assert!(status("").irrelevant());
}

#[test]
fn content_view_mirrors_form_union() {
    let m = pair(
        RawAnnotations {
            form: Some("anecdote"),
            content: Some("a_x"),
            ..Default::default()
        },
        RawAnnotations {
            form: Some("dialogue, anecdote?"),
            content: Some("b_y"),
            ..Default::default()
        },
    );
    assert_eq!(m.form(), vec!["anecdote".to_string(), "dialogue".to_string()]);
    assert_eq!(m.content(), m.form());
}

#[test]
fn narrator_is_first_matching_content_tag() {
    let m = pair(
        RawAnnotations {
            content: Some("x_misc, a_author, b_self"),
            ..Default::default()
        },
        RawAnnotations {
            content: Some("misc"),
            ..Default::default()
        },
    );
    assert_eq!(m.left.narrator(), Some(Narrator::Author));
    assert_eq!(m.right.narrator(), None);
}

#[test]
fn common_entities_is_not_implemented() {
    let m = pair(
        RawAnnotations {
            persons: Some("X"),
            ..Default::default()
        },
        RawAnnotations {
            persons: Some("X"),
            ..Default::default()
        },
    );
    assert!(matches!(m.common_entities(), Err(Error::NotImplemented(_))));
}

#[test]
fn comparison_keeps_insertion_order() {
    let (l, r) = (book("l"), book("r"));
    let mut comparison = BooksComparison::new(Arc::clone(&l), Arc::clone(&r));
    for id in [9, 2, 5] {
        comparison.matches.push(Match::new(
            id,
            passage(&l, RawAnnotations::default()),
            passage(&r, RawAnnotations::default()),
        ));
    }
    let ids: Vec<i64> = comparison.matches.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![9, 2, 5]);
    assert_eq!(comparison.get(5).map(|m| m.id), Some(5));
}
