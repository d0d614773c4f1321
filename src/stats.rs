// Hanzi-Stats Statistics Composer
// Per-grade and cumulative figures with percentage columns

use crate::types::{GradeCounts, GradeTally, HSK_GRADES};
use serde::{Serialize, Serializer};
use tracing::debug;

/// Grade label of a statistics row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradeBand {
    /// HSK grade 1-7, where 7 stands for the 7-9 band
    Hsk(u8),

    /// Everything past HSK 7-9, including characters outside the catalog
    Beyond,
}

impl std::fmt::Display for GradeBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GradeBand::Hsk(grade) if *grade == HSK_GRADES => write!(f, "7-9"),
            GradeBand::Hsk(grade) => write!(f, "{}", grade),
            GradeBand::Beyond => write!(f, "Beyond"),
        }
    }
}

impl Serialize for GradeBand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One row of the statistics table
///
/// Column order is stable: report formatters rely on it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatisticsRow {
    pub grade: GradeBand,
    pub unique: u64,
    pub unique_pct: f64,
    pub cumulative_unique: u64,
    pub cumulative_unique_pct: f64,
    pub occurrences: u64,
    pub occurrences_pct: f64,
    pub cumulative_occurrences: u64,
    pub cumulative_occurrences_pct: f64,
}

/// Round a ratio to 4 decimal places on its exact decimal expansion
///
/// Scaling by 10^4 first would round the float before the decimal cut and
/// turn values just above a halfway point into ties.
#[inline]
fn round_ratio(ratio: f64) -> f64 {
    format!("{:.4}", ratio).parse().unwrap_or(ratio)
}

/// `round(part / whole, 4) * 100`, or 0 when `whole` is 0
///
/// The ratio is rounded before scaling; scaling first changes the last
/// digit in some cases.
///
/// # Example
/// ```
/// # use hanzi_stats::stats::percentage;
/// assert_eq!(percentage(1, 4), 25.0);
/// assert_eq!(percentage(3, 0), 0.0);
/// ```
pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round_ratio(part as f64 / whole as f64) * 100.0
}

fn row(
    grade: GradeBand,
    tally: GradeTally,
    cumulative: GradeTally,
    whole: GradeTally,
    cumulative_whole: GradeTally,
) -> StatisticsRow {
    StatisticsRow {
        grade,
        unique: tally.unique,
        unique_pct: percentage(tally.unique, whole.unique),
        cumulative_unique: cumulative.unique,
        cumulative_unique_pct: percentage(cumulative.unique, cumulative_whole.unique),
        occurrences: tally.occurrences,
        occurrences_pct: percentage(tally.occurrences, whole.occurrences),
        cumulative_occurrences: cumulative.occurrences,
        cumulative_occurrences_pct: percentage(
            cumulative.occurrences,
            cumulative_whole.occurrences,
        ),
    }
}

/// Build the statistics table from grade and cumulative counts
///
/// Rows 1-7 are read directly. The final "beyond" row is the grand total
/// minus cumulative grade 7, so characters missing from the catalog show up
/// there instead of vanishing.
pub fn compute_stats(counts: &GradeCounts, cumulative: &GradeCounts) -> Vec<StatisticsRow> {
    let whole = counts.total();
    let cumulative_whole = cumulative.total();

    let mut rows: Vec<StatisticsRow> = (1..=HSK_GRADES as usize)
        .map(|grade| {
            row(
                GradeBand::Hsk(grade as u8),
                counts[grade],
                cumulative[grade],
                whole,
                cumulative_whole,
            )
        })
        .collect();

    let beyond = whole - cumulative[HSK_GRADES as usize];
    let catalog_beyond = counts[HSK_GRADES as usize + 1];
    if beyond != catalog_beyond {
        let missing = beyond - catalog_beyond;
        debug!(
            unique = missing.unique,
            occurrences = missing.occurrences,
            "Characters outside the catalog"
        );
    }
    rows.push(row(
        GradeBand::Beyond,
        beyond,
        cumulative_whole,
        whole,
        cumulative_whole,
    ));

    rows
}
