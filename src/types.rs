// Hanzi-Stats Type Definitions
// Core types for scripts, variants, grade tallies and errors

use serde::Serialize;
use std::ops::{Add, Index, Sub};
use thiserror::Error;

/// Number of core HSK grades (1-6 plus the combined 7-9 band)
pub const HSK_GRADES: u8 = 7;

/// Grade bucket for catalog characters beyond the core HSK grades
pub const BEYOND_GRADE: u8 = 8;

/// Catalog column used for a lookup or a join
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Script {
    Simplified,
    Traditional,
}

impl Script {
    /// The opposite column
    pub fn other(self) -> Self {
        match self {
            Script::Simplified => Script::Traditional,
            Script::Traditional => Script::Simplified,
        }
    }
}

impl std::fmt::Display for Script {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Script::Simplified => write!(f, "Simplified"),
            Script::Traditional => write!(f, "Traditional"),
        }
    }
}

/// Script variant attributed to a text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Variant {
    /// At least 90% of the discriminating characters are simplified-only
    Simplified,

    /// At least 90% of the discriminating characters are traditional-only
    Traditional,

    /// Mixed text, or no discriminating characters at all
    Unknown,
}

impl Variant {
    /// Catalog column a text of this variant is counted against.
    ///
    /// Unknown texts fall back to the traditional column, which also holds
    /// every character whose forms coincide.
    pub fn script(self) -> Script {
        match self {
            Variant::Simplified => Script::Simplified,
            Variant::Traditional | Variant::Unknown => Script::Traditional,
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::Simplified => write!(f, "Simplified"),
            Variant::Traditional => write!(f, "Traditional"),
            Variant::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Unique-character and total-occurrence counts for one grade
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GradeTally {
    /// Distinct characters seen
    pub unique: u64,

    /// Total occurrences of those characters
    pub occurrences: u64,
}

impl GradeTally {
    pub const ZERO: GradeTally = GradeTally {
        unique: 0,
        occurrences: 0,
    };

    pub fn new(unique: u64, occurrences: u64) -> Self {
        Self {
            unique,
            occurrences,
        }
    }
}

impl Add for GradeTally {
    type Output = GradeTally;

    fn add(self, rhs: GradeTally) -> GradeTally {
        GradeTally {
            unique: self.unique + rhs.unique,
            occurrences: self.occurrences + rhs.occurrences,
        }
    }
}

/// Saturating: a tally never goes negative
impl Sub for GradeTally {
    type Output = GradeTally;

    fn sub(self, rhs: GradeTally) -> GradeTally {
        GradeTally {
            unique: self.unique.saturating_sub(rhs.unique),
            occurrences: self.occurrences.saturating_sub(rhs.occurrences),
        }
    }
}

/// Per-grade tallies indexed 0..=8
///
/// - `[0]`: grand totals
/// - `[1]..=[7]`: HSK grades (7 is the 7-9 band)
/// - `[8]`: catalog characters beyond the core grades
///
/// The same shape holds both plain and cumulative counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GradeCounts {
    entries: [GradeTally; BEYOND_GRADE as usize + 1],
}

impl GradeCounts {
    pub fn new(entries: [GradeTally; BEYOND_GRADE as usize + 1]) -> Self {
        Self { entries }
    }

    /// Grand total held in entry 0
    pub fn total(&self) -> GradeTally {
        self.entries[0]
    }

    /// Tally for a grade, `None` outside 0..=8
    pub fn get(&self, grade: u8) -> Option<GradeTally> {
        self.entries.get(grade as usize).copied()
    }

    /// Tallies for grades 1..=8 in ascending order
    pub fn grades(&self) -> impl Iterator<Item = (u8, GradeTally)> + '_ {
        (1..=BEYOND_GRADE).map(move |grade| (grade, self.entries[grade as usize]))
    }

    /// Sum of the per-grade entries, excluding entry 0
    pub fn sum_of_grades(&self) -> GradeTally {
        self.grades()
            .fold(GradeTally::ZERO, |acc, (_, tally)| acc + tally)
    }
}

impl Index<usize> for GradeCounts {
    type Output = GradeTally;

    fn index(&self, index: usize) -> &GradeTally {
        &self.entries[index]
    }
}

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog is empty")]
    Empty,

    #[error("Malformed catalog row at line {line}: '{content}'")]
    MalformedRow { line: usize, content: String },

    #[error("Invalid grade '{value}' at line {line}: expected 1-8")]
    InvalidGrade { line: usize, value: String },

    #[error("Field '{field}' at line {line} is not a single character")]
    NotSingleCharacter { line: usize, field: String },

    #[error("Character '{character}' at line {line} already listed in grade {grade}")]
    DuplicateCharacter {
        line: usize,
        character: char,
        grade: u8,
    },

    #[error("Unknown mapping direction '{direction}' at line {line}: use s2t or t2s")]
    UnknownDirection { line: usize, direction: String },

    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Umbrella error for the fallible edges of the crate
#[derive(Debug, Error)]
pub enum HanziError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}

pub type Result<T> = std::result::Result<T, HanziError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_display() {
        assert_eq!(Variant::Simplified.to_string(), "Simplified");
        assert_eq!(Variant::Traditional.to_string(), "Traditional");
        assert_eq!(Variant::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_variant_script() {
        assert_eq!(Variant::Simplified.script(), Script::Simplified);
        assert_eq!(Variant::Traditional.script(), Script::Traditional);
        assert_eq!(Variant::Unknown.script(), Script::Traditional);
        assert_eq!(Script::Simplified.other(), Script::Traditional);
    }

    #[test]
    fn test_tally_arithmetic() {
        let a = GradeTally::new(3, 10);
        let b = GradeTally::new(1, 4);
        assert_eq!(a + b, GradeTally::new(4, 14));
        assert_eq!(a - b, GradeTally::new(2, 6));
        assert_eq!(b - a, GradeTally::ZERO);
    }

    #[test]
    fn test_grade_counts_access() {
        let mut entries = [GradeTally::ZERO; 9];
        entries[0] = GradeTally::new(5, 9);
        entries[2] = GradeTally::new(2, 4);
        entries[8] = GradeTally::new(3, 5);
        let counts = GradeCounts::new(entries);

        assert_eq!(counts.total(), GradeTally::new(5, 9));
        assert_eq!(counts[2], GradeTally::new(2, 4));
        assert_eq!(counts.get(9), None);
        assert_eq!(counts.grades().count(), 8);
        assert_eq!(counts.sum_of_grades(), GradeTally::new(5, 9));
    }

    #[test]
    fn test_catalog_error_messages() {
        let err = CatalogError::InvalidGrade {
            line: 4,
            value: "12".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid grade '12' at line 4: expected 1-8");

        let err = CatalogError::DuplicateCharacter {
            line: 9,
            character: '爱',
            grade: 1,
        };
        assert!(err.to_string().contains("grade 1"));
    }
}
