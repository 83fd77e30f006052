//! Show command - one match, both sides

use clap::Parser;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use concord::{EntityMention, Excerpt, Match, MatchView, Passage, SectionKind, Side};

use super::load;
use crate::output::{mention_list, one_line, tag_list, write_json, write_line};
use crate::parser::OutputFormat;

/// One match with both excerpts and merged annotations
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Match id
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Characters of context around each passage
    #[arg(long, default_value_t = 300)]
    pub context: usize,

    /// Output format
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct SideView<'a> {
    book: String,
    image_number: i64,
    chapter: Option<&'a str>,
    patron_section: Option<&'a str>,
    narrator: Option<String>,
    excerpt: Excerpt,
}

fn section_name(p: &Passage, kind: SectionKind) -> Option<&str> {
    p.book()
        .section_at(kind, p.image_number())
        .map(|s| s.name.as_str())
}

impl<'a> SideView<'a> {
    fn of(p: &'a Passage, context: usize) -> Self {
        Self {
            book: p.book().short_descriptor(),
            image_number: p.image_number(),
            chapter: section_name(p, SectionKind::Chapters),
            patron_section: section_name(p, SectionKind::Patrons),
            narrator: p.narrator().map(|n| n.to_string()),
            excerpt: p.excerpt(context),
        }
    }
}

#[derive(Debug, Serialize)]
struct MatchReport<'a> {
    id: i64,
    irrelevant: bool,
    irrelevant_type: &'a str,
    meta: &'a BTreeMap<String, String>,
    left: SideView<'a>,
    right: SideView<'a>,
    persons: Vec<EntityMention>,
    works: Vec<EntityMention>,
    place: Option<&'a EntityMention>,
    patrons: Vec<EntityMention>,
    form: Vec<String>,
}

impl<'a> MatchReport<'a> {
    fn of(m: &'a Match, context: usize) -> Self {
        Self {
            id: m.id,
            irrelevant: m.irrelevant(),
            irrelevant_type: &m.irrelevant_type,
            meta: &m.meta,
            left: SideView::of(m.passage(Side::Left), context),
            right: SideView::of(m.passage(Side::Right), context),
            persons: m.all_persons(),
            works: m.all_works(),
            place: m.place(),
            patrons: m.patron(),
            form: m.form(),
        }
    }
}

pub fn run(args: ShowArgs, config: &Path) -> Result<(), String> {
    let report = load(config)?;
    let m = report
        .comparison
        .get(args.id)
        .ok_or_else(|| format!("No match with id {}", args.id))?;
    let view = MatchReport::of(m, args.context);

    if args.format == OutputFormat::Json {
        return write_json(&view);
    }

    let status = if view.irrelevant { "irrelevant" } else { "relevant" };
    write_line(&format!("match #{} [{status}: {:?}]", view.id, view.irrelevant_type))?;
    for (side, v) in [("left", &view.left), ("right", &view.right)] {
        write_line(&format!(
            "\n{side}: {} | image #{} | chapter: {} | patron: {} | narrator: {}",
            v.book,
            v.image_number,
            v.chapter.unwrap_or("-"),
            v.patron_section.unwrap_or("-"),
            v.narrator.as_deref().unwrap_or("-"),
        ))?;
        write_line(&format!(
            "  ...{} >>{}<< {}...",
            one_line(&v.excerpt.before),
            one_line(&v.excerpt.span),
            one_line(&v.excerpt.after)
        ))?;
    }
    write_line("")?;
    write_line(&format!("persons: {}", mention_list(&view.persons)))?;
    write_line(&format!("works:   {}", mention_list(&view.works)))?;
    write_line(&format!(
        "place:   {}",
        view.place.map_or_else(|| "-".to_string(), ToString::to_string)
    ))?;
    write_line(&format!("patrons: {}", mention_list(&view.patrons)))?;
    write_line(&format!("form:    {}", tag_list(&view.form)))?;
    for (k, v) in view.meta {
        write_line(&format!("meta.{k}: {v}"))?;
    }
    Ok(())
}
