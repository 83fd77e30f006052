//! Persons command - who appears across matches

use clap::Parser;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

use concord::{MatchView, Side};

use super::load;
use crate::output::{write_json, write_line};
use crate::parser::OutputFormat;

/// Persons across relevant matches
#[derive(Parser, Debug)]
pub struct PersonsArgs {
    /// Only list persons in at least this many matches
    #[arg(long, default_value_t = 1)]
    pub min_matches: usize,

    /// Include matches marked irrelevant
    #[arg(long)]
    pub all: bool,

    /// Output format
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct PersonCount {
    name: String,
    matches: usize,
    /// Confident in at least one match
    confident: bool,
    /// Ids of the matches, ascending
    ids: Vec<i64>,
}

pub fn run(args: PersonsArgs, config: &Path) -> Result<(), String> {
    let report = load(config)?;
    let comparison = &report.comparison;

    let mut counts: HashMap<String, PersonCount> = HashMap::new();
    for m in comparison.iter_where(|m| args.all || !m.irrelevant()) {
        for person in m.all_persons() {
            let entry = counts
                .entry(person.name().to_string())
                .or_insert_with(|| PersonCount {
                    name: person.name().to_string(),
                    matches: 0,
                    confident: false,
                    ids: Vec::new(),
                });
            entry.matches += 1;
            entry.confident |= person.is_confident();
            entry.ids.push(m.id);
        }
    }

    let mut persons: Vec<PersonCount> = counts
        .into_values()
        .filter(|p| p.matches >= args.min_matches)
        .collect();
    for p in &mut persons {
        p.ids.sort_unstable();
    }
    persons.sort_by(|a, b| b.matches.cmp(&a.matches).then_with(|| a.name.cmp(&b.name)));

    if args.format == OutputFormat::Json {
        return write_json(&persons);
    }

    write_line(&format!(
        "{} persons ({} / {})",
        persons.len(),
        comparison.book(Side::Left).shorthand,
        comparison.book(Side::Right).shorthand
    ))?;
    for p in &persons {
        let marker = if p.confident { "" } else { "?" };
        write_line(&format!("{:>5}  {}{marker}", p.matches, p.name))?;
    }
    Ok(())
}
