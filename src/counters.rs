// Hanzi-Stats Counters
// Occurrence counts, catalog join and grade aggregation

use crate::catalog::GradeCatalog;
use crate::types::{GradeCounts, GradeTally, Script, BEYOND_GRADE};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use tracing::debug;

/// Count occurrences of each distinct character
///
/// # Example
/// ```
/// # use hanzi_stats::unit_counts;
/// let counts = unit_counts(&['爱', '气', '爱']);
/// assert_eq!(counts[&'爱'], 2);
/// assert_eq!(counts[&'气'], 1);
/// ```
pub fn unit_counts(hanzi: &[char]) -> FxHashMap<char, u64> {
    let mut counts: FxHashMap<char, u64> = FxHashMap::default();
    for &ch in hanzi {
        *counts.entry(ch).or_insert(0) += 1;
    }
    counts
}

/// A catalog entry with the occurrence count of its joined column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnnotatedRow {
    pub simplified: char,
    pub traditional: char,
    pub grade: u8,
    pub count: u64,
}

impl AnnotatedRow {
    #[inline]
    pub fn key(&self, script: Script) -> char {
        match script {
            Script::Simplified => self.simplified,
            Script::Traditional => self.traditional,
        }
    }
}

/// Occurrence counts left-joined onto every catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedCounts {
    script: Script,
    rows: Vec<AnnotatedRow>,
}

impl AnnotatedCounts {
    /// Column the counts were joined on
    pub fn script(&self) -> Script {
        self.script
    }

    /// One row per catalog entry, in catalog order
    pub fn rows(&self) -> &[AnnotatedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows with a nonzero count
    pub fn found(&self) -> impl Iterator<Item = &AnnotatedRow> + '_ {
        self.rows.iter().filter(|row| row.count > 0)
    }

    /// Count joined onto `character`, zero when absent
    pub fn count_of(&self, character: char) -> u64 {
        self.rows
            .iter()
            .find(|row| row.key(self.script) == character)
            .map_or(0, |row| row.count)
    }

    /// Keys whose rows span more than one grade
    ///
    /// Ambiguous mappings can reach one character from several grades
    /// (traditional 著 via 着 and via 著). These keys are counted once, at
    /// their lowest grade, by [`granular_counts`].
    pub fn ambiguous_keys(&self) -> Vec<char> {
        let mut grades: FxHashMap<char, FxHashSet<u8>> = FxHashMap::default();
        for row in &self.rows {
            grades
                .entry(row.key(self.script))
                .or_default()
                .insert(row.grade);
        }

        let mut keys: Vec<char> = grades
            .into_iter()
            .filter(|(_, g)| g.len() > 1)
            .map(|(key, _)| key)
            .collect();
        keys.sort_unstable();
        keys
    }
}

/// Join occurrence counts of `hanzi` onto the catalog's `script` column
///
/// Every catalog entry appears exactly once, zero-filled. Entries sharing a
/// key each carry that key's full count.
pub fn get_counts(hanzi: &[char], script: Script, catalog: &GradeCatalog) -> AnnotatedCounts {
    let counts = unit_counts(hanzi);

    let rows = catalog
        .entries()
        .iter()
        .map(|entry| AnnotatedRow {
            simplified: entry.simplified,
            traditional: entry.traditional,
            grade: entry.grade,
            count: counts.get(&entry.key(script)).copied().unwrap_or(0),
        })
        .collect();

    AnnotatedCounts { script, rows }
}

/// Roll annotated counts up into per-grade tallies
///
/// Entries 1..=8 count each found key once, at its lowest grade. A key that
/// ambiguous mappings place in several grades (traditional 著 via grade-1 着
/// and grade-4 著) therefore never adds to the higher grade; such keys are
/// listed by [`AnnotatedCounts::ambiguous_keys`]. Entry 0 is taken from
/// `hanzi` itself: distinct characters and total length, so characters
/// outside the catalog still show in the grand total.
pub fn granular_counts(annotated: &AnnotatedCounts, hanzi: &[char]) -> GradeCounts {
    let script = annotated.script();

    // key → (lowest grade, count)
    let mut keys: FxHashMap<char, (u8, u64)> = FxHashMap::default();
    for row in annotated.found() {
        let key = row.key(script);
        keys.entry(key)
            .and_modify(|(grade, _)| {
                if row.grade != *grade {
                    debug!(character = %key, first = *grade, other = row.grade, "Key spans several grades");
                }
                *grade = (*grade).min(row.grade);
            })
            .or_insert((row.grade, row.count));
    }

    let mut entries = [GradeTally::ZERO; BEYOND_GRADE as usize + 1];
    for (grade, count) in keys.into_values() {
        let tally = &mut entries[grade as usize];
        tally.unique += 1;
        tally.occurrences += count;
    }

    let distinct: FxHashSet<char> = hanzi.iter().copied().collect();
    entries[0] = GradeTally::new(distinct.len() as u64, hanzi.len() as u64);

    GradeCounts::new(entries)
}

/// Running sums of grade tallies in ascending grade order
///
/// Entry i holds the sum of entries 1..=i; entry 0 restates the grand total.
pub fn cumulative_counts(counts: &GradeCounts) -> GradeCounts {
    let mut entries = [GradeTally::ZERO; BEYOND_GRADE as usize + 1];
    let mut running = GradeTally::ZERO;

    for (grade, tally) in counts.grades() {
        running = running + tally;
        entries[grade as usize] = running;
    }
    entries[0] = counts.total();

    GradeCounts::new(entries)
}
