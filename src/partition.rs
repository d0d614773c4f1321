// Hanzi-Stats Character Partitioner
// Splits an occurrence sequence by catalog column

use crate::catalog::GradeCatalog;
use crate::types::Script;

/// Occurrences split by the catalog column they were found in
///
/// A character whose simplified and traditional forms coincide (or that
/// an ambiguous mapping lists in both columns) lands in all three lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Occurrences found in the simplified column
    pub simplified: Vec<char>,

    /// Occurrences found in the traditional column
    pub traditional: Vec<char>,

    /// Occurrences found in both columns
    pub shared: Vec<char>,
}

impl Partition {
    /// Occurrences for one column
    pub fn for_script(&self, script: Script) -> &[char] {
        match script {
            Script::Simplified => &self.simplified,
            Script::Traditional => &self.traditional,
        }
    }

    /// True when no occurrence matched the catalog
    pub fn is_empty(&self) -> bool {
        self.simplified.is_empty() && self.traditional.is_empty()
    }
}

/// Partition Han character occurrences against the catalog
///
/// Each occurrence is emitted once per column it appears in, regardless of
/// how many catalog rows hold it. Characters outside the catalog are dropped.
///
/// # Example
/// ```
/// # use hanzi_stats::{partition_hanzi, GradeCatalog};
/// let catalog = GradeCatalog::bundled().unwrap();
/// let parts = partition_hanzi(&['爱', '愛', '是', 'x'], &catalog);
/// assert_eq!(parts.simplified, vec!['爱', '是']);
/// assert_eq!(parts.traditional, vec!['愛', '是']);
/// assert_eq!(parts.shared, vec!['是']);
/// ```
pub fn partition_hanzi(hanzi: &[char], catalog: &GradeCatalog) -> Partition {
    let mut partition = Partition::default();

    for &ch in hanzi {
        let in_simplified = catalog.contains(ch, Script::Simplified);
        let in_traditional = catalog.contains(ch, Script::Traditional);

        if in_simplified {
            partition.simplified.push(ch);
        }
        if in_traditional {
            partition.traditional.push(ch);
        }
        if in_simplified && in_traditional {
            partition.shared.push(ch);
        }
    }

    partition
}
