//! # Hanzi-Stats: Script Variant and HSK Grade Statistics
//!
//! Classifies Chinese text as Simplified, Traditional or Unknown and reports
//! how its characters spread over the HSK 3.0 grades.
//!
//! ## Pipeline
//!
//! 1. **Extract** - keep only Han characters, in order, duplicates kept
//!    - `filter_text("你好, world")` → `['你', '好']`
//! 2. **Partition** - split by catalog column (simplified, traditional, shared)
//! 3. **Identify** - at least 90% simplified-only characters → Simplified,
//!    at most 10% → Traditional, otherwise Unknown
//! 4. **Count** - join occurrence counts onto the variant's catalog column
//! 5. **Grade** - unique and total counts per grade, then running sums
//! 6. **Report** - eight rows (grades 1-6, 7-9, Beyond) with percentages
//!
//! ## Example Usage
//!
//! ```
//! use hanzi_stats::{Analyser, Variant};
//!
//! let analyser = Analyser::bundled()?;
//! let analysis = analyser.analyse_text("这是我们的爱车。");
//!
//! assert_eq!(analysis.variant, Variant::Simplified);
//! assert_eq!(analysis.statistics.len(), 8);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - **Grade Catalog** - simplified/traditional/grade table with ambiguous mappings
//! - **Partitioner** - splits hanzi by the column they occur in
//! - **Variant Identifier** - ratio of simplified-only to discriminating characters
//! - **Counters** - per-character joins, grade tallies and cumulative sums
//! - **Statistics Composer** - percentage table
//! - **Analyser API** - main entry point combining all components

pub mod analyse;
pub mod catalog;
pub mod config;
pub mod counters;
pub mod data;
pub mod extract;
pub mod partition;
pub mod stats;
pub mod types;
pub mod variant;

// Re-export main types and functions for convenience
pub use analyse::{analyse_hanzi, Analyser, Analysis};
pub use catalog::{CatalogEntry, GradeCatalog};
pub use config::{AnalysisConfig, ConfigError};
pub use counters::{
    cumulative_counts, get_counts, granular_counts, unit_counts, AnnotatedCounts, AnnotatedRow,
};
pub use data::{DataInfo, DataLoader};
pub use extract::filter_text;
pub use partition::{partition_hanzi, Partition};
pub use stats::{compute_stats, GradeBand, StatisticsRow};
pub use types::{
    CatalogError, GradeCounts, GradeTally, HanziError, Result, Script, Variant, BEYOND_GRADE,
    HSK_GRADES,
};
pub use variant::{identify_variant, identify_variant_with, Thresholds};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
