//! concord - inspect annotated passage matches between two books
//!
//! Every command loads the comparison described by a TOML config first,
//! then reports on it.
//!
//! # Usage
//!
//! ```bash
//! # Counts, rejected rows, narrator distribution
//! concord summary -c data/comparison.toml
//!
//! # One match, both excerpts and the merged annotations
//! concord show 42 --context 200
//!
//! # Persons across relevant matches, as JSON
//! concord persons --min-matches 3 --format json
//!
//! # Chapter table of the right-hand book
//! concord sections right --kind chapters
//! ```
//!
//! Logging goes to stderr. `-v` raises it to info, `-vv` to debug;
//! `RUST_LOG` overrides both.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;
mod parser;

use parser::{Cli, Commands};

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config.as_path();
    let result: Result<(), String> = match cli.command {
        Commands::Summary(args) => commands::summary::run(args, config),
        Commands::Show(args) => commands::show::run(args, config),
        Commands::Persons(args) => commands::persons::run(args, config),
        Commands::Sections(args) => commands::sections::run(args, config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", output::color("31", "error:"), e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Route `log` records to stderr through `tracing-subscriber`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A second init (tests embedding the binary) is not an error.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
