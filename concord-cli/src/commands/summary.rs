//! Summary command - counts over the whole comparison

use clap::Parser;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use concord::{Book, BooksComparison, MatchView, Side};

use super::load;
use crate::output::{write_json, write_line};
use crate::parser::OutputFormat;

/// Overview of the loaded comparison
#[derive(Parser, Debug)]
pub struct SummaryArgs {
    /// Output format
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct BookSummary {
    shorthand: String,
    descriptor: String,
    nb_images: i64,
    chapters: usize,
    patron_sections: usize,
}

impl BookSummary {
    fn of(book: &Book) -> Self {
        Self {
            shorthand: book.shorthand.clone(),
            descriptor: book.short_descriptor(),
            nb_images: book.nb_images,
            chapters: book.sections(concord::SectionKind::Chapters).len(),
            patron_sections: book.sections(concord::SectionKind::Patrons).len(),
        }
    }
}

#[derive(Debug, Serialize)]
struct RejectedRow {
    row: i64,
    error: String,
}

#[derive(Debug, Serialize)]
struct Summary {
    left: BookSummary,
    right: BookSummary,
    matches: usize,
    relevant: usize,
    rejected: Vec<RejectedRow>,
    /// side → narrator label → passages
    narrators: BTreeMap<String, BTreeMap<String, usize>>,
}

fn narrator_counts(comparison: &BooksComparison, side: Side) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for m in &comparison.matches {
        let label = m
            .passage(side)
            .narrator()
            .map_or("NONE", |n| n.as_str());
        *counts.entry(label.to_string()).or_insert(0) += 1;
    }
    counts
}

pub fn run(args: SummaryArgs, config: &Path) -> Result<(), String> {
    let report = load(config)?;
    let c = &report.comparison;

    let summary = Summary {
        left: BookSummary::of(&c.book_left),
        right: BookSummary::of(&c.book_right),
        matches: c.len(),
        relevant: c.iter_where(|m| !m.irrelevant()).count(),
        rejected: report
            .rejected
            .iter()
            .map(|r| RejectedRow {
                row: r.row,
                error: r.error.to_string(),
            })
            .collect(),
        narrators: Side::BOTH
            .iter()
            .map(|&side| (side.to_string(), narrator_counts(c, side)))
            .collect(),
    };

    match args.format {
        OutputFormat::Json => write_json(&summary),
        OutputFormat::Human => {
            for (side, book) in [("left", &summary.left), ("right", &summary.right)] {
                write_line(&format!(
                    "{side:<6} {} ({}): {} images, {} chapters, {} patron sections",
                    book.descriptor,
                    book.shorthand,
                    book.nb_images,
                    book.chapters,
                    book.patron_sections
                ))?;
            }
            write_line(&format!(
                "matches: {} ({} relevant), rejected rows: {}",
                summary.matches,
                summary.relevant,
                summary.rejected.len()
            ))?;
            for (side, counts) in &summary.narrators {
                let parts: Vec<String> = counts.iter().map(|(n, k)| format!("{n}={k}")).collect();
                write_line(&format!("narrators {side}: {}", parts.join(" ")))?;
            }
            for r in &summary.rejected {
                write_line(&format!("  rejected {}: {}", r.row, r.error))?;
            }
            Ok(())
        }
    }
}
