//! Interest levels and per-area preferences

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sign-up label for the strongest interest level
pub const VERY_INTERESTED_LABEL: &str = "Very Interested";

/// Sign-up label for the middle interest level
pub const INTERESTED_LABEL: &str = "Interested";

/// How much a student wants classes in one interest area.
///
/// Variants are declared in search order, so `Very < Maybe < Nope`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Interest {
    /// "Very Interested"
    Very,
    /// "Interested"
    Maybe,
    /// Anything else, including blank answers
    Nope,
}

impl Interest {
    /// All levels in search order
    pub const ALL: [Self; 3] = [Self::Very, Self::Maybe, Self::Nope];

    /// Map a raw sign-up label to a level.
    ///
    /// Only the two positive labels are recognized; every other value
    /// (blank, misspelled, "Not Interested") counts as [`Interest::Nope`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            VERY_INTERESTED_LABEL => Self::Very,
            INTERESTED_LABEL => Self::Maybe,
            _ => Self::Nope,
        }
    }

    /// Position of this level in [`Interest::ALL`]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Very => 0,
            Self::Maybe => 1,
            Self::Nope => 2,
        }
    }
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Very => "VERY",
            Self::Maybe => "MAYBE",
            Self::Nope => "NOPE",
        };
        f.pad(name)
    }
}

/// A student's interest level in a single area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    area: String,
    level: Interest,
}

impl Preference {
    /// Build a preference from a raw sign-up label
    #[must_use]
    pub fn new(area: impl Into<String>, label: &str) -> Self {
        Self::with_level(area, Interest::from_label(label))
    }

    /// Build a preference from an already-mapped level
    #[must_use]
    pub fn with_level(area: impl Into<String>, level: Interest) -> Self {
        Self {
            area: area.into(),
            level,
        }
    }

    /// Interest area id (e.g. `arts_crafts`)
    #[must_use]
    pub fn area(&self) -> &str {
        &self.area
    }

    /// Interest level
    #[must_use]
    pub const fn level(&self) -> Interest {
        self.level
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.area, self.level)
    }
}
