//! Comparison configuration.
//!
//! A comparison is described by one TOML file naming the match table and
//! the two books:
//!
//! ```toml
//! [matches]
//! path = "matches.csv"
//! skip_rows = 1
//! id_column = 1
//!
//! [left]
//! shorthand = "domenico"
//! author = "Domenico Bernini"
//! title = "Vita del Cavalier Gio. Lorenzo Bernino"
//! year = 1713
//! data = "domenico.json"
//! structure = "domenico_structure.json"
//!
//! [right]
//! shorthand = "baldinucci"
//! author = "Filippo Baldinucci"
//! title = "Vita del Cavaliere Gio. Lorenzo Bernino"
//! year = 1682
//! data = "baldinucci.json"
//! ```
//!
//! Relative paths are resolved against the directory holding the file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result, Side};

/// Where the match table lives and how to read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchesConfig {
    /// CSV file with one match per row.
    pub path: PathBuf,
    /// Lines to skip before the header line.
    #[serde(default = "default_skip_rows")]
    pub skip_rows: usize,
    /// Zero-based index of the column holding the row id.
    #[serde(default = "default_id_column")]
    pub id_column: usize,
}

fn default_skip_rows() -> usize {
    1
}

fn default_id_column() -> usize {
    1
}

/// One book of the comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookConfig {
    /// Short key; also the column suffix in the match table.
    pub shorthand: String,
    /// Author name.
    pub author: String,
    /// Title.
    #[serde(default)]
    pub title: String,
    /// Publication year.
    pub year: i32,
    /// JSON file with `pages` and `text`.
    pub data: PathBuf,
    /// JSON file with pagination, chapters and patrons.
    #[serde(default)]
    pub structure: Option<PathBuf>,
}

/// A full comparison description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonConfig {
    /// Match table.
    pub matches: MatchesConfig,
    /// Left book.
    pub left: BookConfig,
    /// Right book.
    pub right: BookConfig,
    #[serde(skip)]
    base_dir: PathBuf,
}

impl ComparisonConfig {
    /// Parse a configuration; relative paths resolve against `base_dir`.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] on TOML errors or failed validation.
    pub fn from_toml_str(contents: &str, base_dir: impl Into<PathBuf>) -> Result<Self> {
        let mut config: ComparisonConfig =
            toml::from_str(contents).map_err(|e| Error::config(e.to_string()))?;
        config.base_dir = base_dir.into();
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file cannot be read, otherwise as
    /// [`ComparisonConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        log::debug!("loaded comparison config from {}", path.display());
        Self::from_toml_str(&contents, base_dir)
    }

    fn validate(&self) -> Result<()> {
        for side in Side::BOTH {
            if self.book(side).shorthand.trim().is_empty() {
                return Err(Error::config(format!("{side} book has an empty shorthand")));
            }
        }
        if self.left.shorthand == self.right.shorthand {
            return Err(Error::config(format!(
                "both books use the shorthand '{}'; column keys would collide",
                self.left.shorthand
            )));
        }
        Ok(())
    }

    /// Book description of one side.
    #[must_use]
    pub fn book(&self, side: Side) -> &BookConfig {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Resolve a configured path against the config directory.
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Resolved match table path.
    #[must_use]
    pub fn matches_path(&self) -> PathBuf {
        self.resolve(&self.matches.path)
    }
}
