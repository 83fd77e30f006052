//! Command implementations for the concord CLI
//!
//! Each command has its own module and loads the comparison through
//! [`load`].

pub mod persons;
pub mod sections;
pub mod show;
pub mod summary;

pub use persons::PersonsArgs;
pub use sections::SectionsArgs;
pub use show::ShowArgs;
pub use summary::SummaryArgs;

use std::path::Path;

use concord::ingest::{load_comparison, LoadReport};
use concord::ComparisonConfig;

/// Load the comparison a config file describes.
///
/// Rejected rows are logged during the load; they do not fail the command.
pub fn load(config: &Path) -> Result<LoadReport, String> {
    let config = ComparisonConfig::load(config)
        .map_err(|e| format!("Failed to read config {}: {e}", config.display()))?;
    log::info!(
        "comparing '{}' with '{}'",
        config.left.shorthand,
        config.right.shorthand
    );
    load_comparison(&config).map_err(|e| format!("Failed to load comparison: {e}"))
}
