//! CLI argument parsing and structure definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::commands;

/// Inspect a two-book comparison: matches, merged annotations, structure
#[derive(Parser, Debug)]
#[command(name = "concord")]
#[command(
    author,
    version,
    about = "Inspect annotated passage matches between two books",
    long_about = r#"
concord - annotated passage matches between two books

A comparison is described by a TOML file naming the two books (text and
structure JSON) and the CSV match table. Every command loads it first;
rows with malformed annotations are skipped and reported.

EXAMPLES:
  concord summary -c data/comparison.toml
  concord show 42 -c data/comparison.toml --context 200
  concord persons -c data/comparison.toml --min-matches 3
  concord sections left --kind patrons -c data/comparison.toml
"#
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Comparison config file
    #[arg(short, long, global = true, value_name = "FILE", default_value = "comparison.toml")]
    pub config: PathBuf,

    /// More log output (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Overview of the loaded comparison
    #[command(visible_alias = "s")]
    Summary(commands::SummaryArgs),

    /// One match with both excerpts and merged annotations
    Show(commands::ShowArgs),

    /// Persons across relevant matches
    #[command(visible_alias = "p")]
    Persons(commands::PersonsArgs),

    /// Structural sections of one book
    Sections(commands::SectionsArgs),
}

/// Output format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text for terminals
    #[default]
    Human,
    /// Pretty-printed JSON
    Json,
}
