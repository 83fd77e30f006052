//! Sections command - chapter and patron structure of one book

use clap::Parser;
use std::path::Path;

use concord::{SectionKind, Side};

use super::load;
use crate::output::{write_json, write_line};
use crate::parser::OutputFormat;

/// Structural sections of one book
#[derive(Parser, Debug)]
pub struct SectionsArgs {
    /// Which book of the comparison: left or right
    #[arg(value_name = "SIDE")]
    pub side: Side,

    /// Section sequence to list: chapters or patrons
    #[arg(long, default_value = "chapters")]
    pub kind: SectionKind,

    /// Output format
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,
}

pub fn run(args: SectionsArgs, config: &Path) -> Result<(), String> {
    let report = load(config)?;
    let book = report.comparison.book(args.side);
    let kind = args.kind;
    let sections = book.sections(kind);

    if args.format == OutputFormat::Json {
        return write_json(&sections);
    }

    write_line(&format!(
        "{} - {} {kind} ({} images)",
        book.short_descriptor(),
        sections.len(),
        book.nb_images
    ))?;
    for s in sections {
        write_line(&format!(
            "{:>5}-{:<5} p.{:>4}-{:<4} {}",
            s.image_number_begin,
            s.image_number_end,
            s.page_number_begin,
            s.page_number_end,
            s.label()
        ))?;
    }
    Ok(())
}
