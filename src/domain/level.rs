//! JLPT proficiency levels

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A JLPT level, N1 (hardest) through N5 (easiest)
///
/// The vocabulary service is queried by the numeric level; exported rows are
/// labelled with the `N<k>` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct JlptLevel(u8);

impl JlptLevel {
    /// Every level, in the order the vocabulary export walks them
    pub const ALL: [JlptLevel; 5] = [
        JlptLevel(1),
        JlptLevel(2),
        JlptLevel(3),
        JlptLevel(4),
        JlptLevel(5),
    ];

    /// Creates a level from its number (1..=5)
    pub fn new(level: u8) -> Result<Self, String> {
        if (1..=5).contains(&level) {
            Ok(Self(level))
        } else {
            Err(format!("JLPT level must be between 1 and 5, got {level}"))
        }
    }

    /// Numeric level as sent to the vocabulary service
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Row label, e.g. `N3`
    pub fn label(&self) -> String {
        format!("N{}", self.0)
    }
}

impl fmt::Display for JlptLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

impl FromStr for JlptLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches(['N', 'n']);
        let level = digits
            .parse::<u8>()
            .map_err(|_| format!("Invalid JLPT level '{s}'"))?;
        Self::new(level)
    }
}

impl TryFrom<u8> for JlptLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<JlptLevel> for u8 {
    fn from(level: JlptLevel) -> Self {
        level.0
    }
}
