// Hanzi-Stats Analyser
// Main API that runs the whole pipeline

use crate::catalog::GradeCatalog;
use crate::config::AnalysisConfig;
use crate::counters::{cumulative_counts, get_counts, granular_counts, AnnotatedCounts};
use crate::extract::filter_text;
use crate::partition::partition_hanzi;
use crate::stats::{compute_stats, StatisticsRow};
use crate::types::{CatalogError, GradeCounts, HanziError, Variant};
use crate::variant::{identify_variant_with, Thresholds};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Everything one analysis run produces
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Detected script variant
    pub variant: Variant,

    /// Catalog joined with the counts of the variant's column
    pub annotated: AnnotatedCounts,

    /// Per-grade tallies, entry 0 the grand total
    pub grade_counts: GradeCounts,

    /// Running sums of `grade_counts`
    pub cumulative: GradeCounts,

    /// Report table
    pub statistics: Vec<StatisticsRow>,
}

/// Run the pipeline over extracted Han characters
///
/// Partition → identify variant → join counts on the variant's column →
/// grade tallies → cumulative tallies → statistics.
pub fn analyse_hanzi(hanzi: &[char], catalog: &GradeCatalog, thresholds: &Thresholds) -> Analysis {
    let partition = partition_hanzi(hanzi, catalog);
    let variant = identify_variant_with(&partition.simplified, &partition.traditional, thresholds);

    let script = variant.script();
    let annotated = get_counts(partition.for_script(script), script, catalog);
    let grade_counts = granular_counts(&annotated, hanzi);
    let cumulative = cumulative_counts(&grade_counts);
    let statistics = compute_stats(&grade_counts, &cumulative);

    Analysis {
        variant,
        annotated,
        grade_counts,
        cumulative,
        statistics,
    }
}

/// Main hanzi analysis engine
///
/// Holds a shared, read-only catalog handle, so one analyser (or clones of
/// it) can serve any number of threads.
#[derive(Debug, Clone)]
pub struct Analyser {
    catalog: Arc<GradeCatalog>,
    thresholds: Thresholds,
}

impl Analyser {
    pub fn new(catalog: Arc<GradeCatalog>, thresholds: Thresholds) -> Self {
        Self {
            catalog,
            thresholds,
        }
    }

    /// Analyser over the bundled catalog with default thresholds
    pub fn bundled() -> Result<Self, CatalogError> {
        Ok(Self::new(GradeCatalog::bundled()?, Thresholds::default()))
    }

    /// Analyser built from a validated configuration
    pub fn from_config(config: &AnalysisConfig) -> Result<Self, HanziError> {
        config.validate()?;
        let catalog = config.load_catalog()?;
        Ok(Self::new(catalog, config.thresholds()))
    }

    pub fn catalog(&self) -> &GradeCatalog {
        &self.catalog
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Analyse an already extracted character sequence
    pub fn analyse(&self, hanzi: &[char]) -> Analysis {
        analyse_hanzi(hanzi, &self.catalog, &self.thresholds)
    }

    /// Extract Han characters from `text` and analyse them
    pub fn analyse_text(&self, text: &str) -> Analysis {
        let hanzi = filter_text(text);
        let analysis = self.analyse(&hanzi);
        info!(
            hanzi = hanzi.len(),
            variant = %analysis.variant,
            "Text analysed"
        );
        analysis
    }

    /// Analyse independent texts in parallel, results in input order
    pub fn analyse_batch<S>(&self, texts: &[S]) -> Vec<Analysis>
    where
        S: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.analyse_text(text.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GradeTally;

    fn create_analyser() -> Result<Analyser, Box<dyn std::error::Error>> {
        Ok(Analyser::bundled()?)
    }

    #[test]
    fn test_analyser_creation() -> Result<(), Box<dyn std::error::Error>> {
        let analyser = create_analyser()?;
        assert!(!analyser.catalog().is_empty());
        assert_eq!(analyser.thresholds(), Thresholds::default());
        Ok(())
    }

    #[test]
    fn test_simplified_text() -> Result<(), Box<dyn std::error::Error>> {
        let analyser = create_analyser()?;
        let analysis = analyser.analyse_text("这是我们的爱车。");

        assert_eq!(analysis.variant, Variant::Simplified);
        assert_eq!(analysis.annotated.script(), crate::Script::Simplified);
        assert_eq!(analysis.statistics.len(), 8);
        Ok(())
    }

    #[test]
    fn test_traditional_text() -> Result<(), Box<dyn std::error::Error>> {
        let analyser = create_analyser()?;
        let analysis = analyser.analyse_text("這是我們的愛車。");

        assert_eq!(analysis.variant, Variant::Traditional);
        assert_eq!(analysis.annotated.script(), crate::Script::Traditional);
        Ok(())
    }

    #[test]
    fn test_empty_text() -> Result<(), Box<dyn std::error::Error>> {
        let analyser = create_analyser()?;
        let analysis = analyser.analyse_text("");

        assert_eq!(analysis.variant, Variant::Unknown);
        assert_eq!(analysis.grade_counts, GradeCounts::default());
        assert_eq!(analysis.cumulative.total(), GradeTally::ZERO);
        Ok(())
    }

    #[test]
    fn test_batch_keeps_order() -> Result<(), Box<dyn std::error::Error>> {
        let analyser = create_analyser()?;
        let texts = ["这是我们的爱车", "這是我們的愛車", "no hanzi here"];
        let results = analyser.analyse_batch(&texts);

        let variants: Vec<Variant> = results.iter().map(|a| a.variant).collect();
        assert_eq!(
            variants,
            vec![Variant::Simplified, Variant::Traditional, Variant::Unknown]
        );
        Ok(())
    }

    #[test]
    fn test_from_config() -> Result<(), Box<dyn std::error::Error>> {
        let config = AnalysisConfig {
            threshold: 0.75,
            ..AnalysisConfig::default()
        };
        let analyser = Analyser::from_config(&config)?;
        assert_eq!(analyser.thresholds().threshold, 0.75);
        Ok(())
    }
}
