//! Entity mentions extracted from passage annotations.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A named entity reference (person, work, place, patron) with a confidence flag.
///
/// Identity is the name alone: two mentions of "Titian", one certain and one
/// tentative, compare equal and hash alike. Confidence is a fact about the
/// mention, and merging across sides reconciles it separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityMention {
    name: String,
    confident: bool,
}

impl EntityMention {
    /// Create a mention.
    #[must_use]
    pub fn new(name: impl Into<String>, confident: bool) -> Self {
        Self {
            name: name.into(),
            confident,
        }
    }

    /// Create a confident mention.
    #[must_use]
    pub fn confident(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    /// Create a tentative (`?`-marked) mention.
    #[must_use]
    pub fn tentative(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    /// Entity name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the extraction was certain.
    #[must_use]
    pub const fn is_confident(&self) -> bool {
        self.confident
    }

    /// Exact comparison including the confidence flag.
    #[must_use]
    pub fn same_as(&self, other: &EntityMention) -> bool {
        self.name == other.name && self.confident == other.confident
    }
}

impl PartialEq for EntityMention {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for EntityMention {}

impl Hash for EntityMention {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl std::fmt::Display for EntityMention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.confident {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}?", self.name)
        }
    }
}
