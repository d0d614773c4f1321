// Hanzi-Stats Variant Identifier
// Decides Simplified / Traditional / Unknown from asymmetric set differences

use crate::types::Variant;
use rustc_hash::FxHashSet;
use tracing::debug;

/// Share of discriminating characters needed to call a variant
pub const DEFAULT_THRESHOLD: f64 = 0.90;

/// Tolerance absorbing float rounding at the threshold
pub const DEFAULT_EPSILON: f64 = 0.000_000_000_1;

/// Decision bounds for [`identify_variant_with`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub threshold: f64,
    pub epsilon: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

/// Share of simplified-only characters among all discriminating ones
///
/// `None` when neither side has a character the other lacks.
pub fn variant_ratio(simplified: &[char], traditional: &[char]) -> Option<f64> {
    let simplified: FxHashSet<char> = simplified.iter().copied().collect();
    let traditional: FxHashSet<char> = traditional.iter().copied().collect();

    let simplified_only = simplified.difference(&traditional).count();
    let traditional_only = traditional.difference(&simplified).count();

    if simplified_only == 0 && traditional_only == 0 {
        return None;
    }

    Some(simplified_only as f64 / (simplified_only + traditional_only) as f64)
}

/// Identify the script variant with the default 0.90 threshold
///
/// # Arguments
/// * `simplified` - Occurrences found in the catalog's simplified column
/// * `traditional` - Occurrences found in the catalog's traditional column
///
/// # Example
/// ```
/// # use hanzi_stats::{identify_variant, Variant};
/// assert_eq!(identify_variant(&['这', '们', '是'], &['是']), Variant::Simplified);
/// assert_eq!(identify_variant(&['是'], &['這', '們', '是']), Variant::Traditional);
/// assert_eq!(identify_variant(&[], &[]), Variant::Unknown);
/// ```
pub fn identify_variant(simplified: &[char], traditional: &[char]) -> Variant {
    identify_variant_with(simplified, traditional, &Thresholds::default())
}

/// Identify the script variant with explicit bounds
pub fn identify_variant_with(
    simplified: &[char],
    traditional: &[char],
    thresholds: &Thresholds,
) -> Variant {
    let Some(ratio) = variant_ratio(simplified, traditional) else {
        debug!("No discriminating characters");
        return Variant::Unknown;
    };

    let Thresholds { threshold, epsilon } = *thresholds;
    let variant = if ratio >= threshold - epsilon {
        Variant::Simplified
    } else if ratio <= 1.0 - threshold + epsilon {
        Variant::Traditional
    } else {
        Variant::Unknown
    };

    debug!(ratio, %variant, "Variant identified");
    variant
}
