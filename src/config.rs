// Hanzi-Stats Configuration
// Thresholds and catalog locations from defaults, TOML files or the environment

use crate::catalog::GradeCatalog;
use crate::data::DataLoader;
use crate::types::{CatalogError, HanziError};
use crate::variant::{Thresholds, DEFAULT_EPSILON, DEFAULT_THRESHOLD};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Environment variable {var_name}: value '{value}' is not a valid {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },

    #[error("Threshold {0} must be in (0.5, 1.0]")]
    InvalidThreshold(f64),

    #[error("Epsilon {0} must be a small non-negative number")]
    InvalidEpsilon(f64),
}

/// Analysis configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Share of discriminating characters needed to call a variant
    pub threshold: f64,
    /// Tolerance around the threshold
    pub epsilon: f64,
    /// Base catalog file; the bundled catalog when unset
    pub catalog_path: Option<PathBuf>,
    /// Ambiguous mapping file; the bundled mappings when unset and no
    /// catalog file is given
    pub ambiguous_path: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            epsilon: DEFAULT_EPSILON,
            catalog_path: None,
            ambiguous_path: None,
        }
    }
}

impl AnalysisConfig {
    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Defaults overlaid with `HANZI_STATS_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Defaults overlaid with variables from `lookup`
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let default = Self::default();
        let config = Self {
            threshold: parse_var(&lookup, "HANZI_STATS_THRESHOLD")?.unwrap_or(default.threshold),
            epsilon: parse_var(&lookup, "HANZI_STATS_EPSILON")?.unwrap_or(default.epsilon),
            catalog_path: lookup("HANZI_STATS_CATALOG").map(PathBuf::from),
            ambiguous_path: lookup("HANZI_STATS_AMBIGUOUS").map(PathBuf::from),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject thresholds that would let both variants match at once
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.threshold > 0.5 && self.threshold <= 1.0) {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }
        if !(0.0..0.01).contains(&self.epsilon) {
            return Err(ConfigError::InvalidEpsilon(self.epsilon));
        }
        Ok(())
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            threshold: self.threshold,
            epsilon: self.epsilon,
        }
    }

    /// Resolve the configured catalog
    pub fn load_catalog(&self) -> Result<Arc<GradeCatalog>, HanziError> {
        let catalog = match (&self.catalog_path, &self.ambiguous_path) {
            (None, None) => return Ok(GradeCatalog::bundled()?),
            (Some(base), ambiguous) => GradeCatalog::from_paths(base, ambiguous.as_deref())?,
            (None, Some(ambiguous)) => {
                let text =
                    std::fs::read_to_string(ambiguous).map_err(|source| CatalogError::Io {
                        path: ambiguous.display().to_string(),
                        source,
                    })?;
                GradeCatalog::from_tsv(DataLoader::catalog_data(), &text)?
            }
        };
        info!(entries = catalog.len(), "Using configured catalog");
        Ok(Arc::new(catalog))
    }
}

fn parse_var(
    lookup: &impl Fn(&str) -> Option<String>,
    var_name: &str,
) -> Result<Option<f64>, ConfigError> {
    match lookup(var_name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: "f64".to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default() {
        let config = AnalysisConfig::default();
        assert_eq!(config.threshold, 0.90);
        assert_eq!(config.epsilon, DEFAULT_EPSILON);
        assert!(config.catalog_path.is_none());
        assert!(config.validate().is_ok());
        assert_eq!(config.thresholds(), Thresholds::default());
    }

    #[test]
    fn test_toml_partial() {
        let config = AnalysisConfig::from_toml_str("threshold = 0.8\n").unwrap();
        assert_eq!(config.threshold, 0.8);
        assert_eq!(config.epsilon, DEFAULT_EPSILON);
    }

    #[test]
    fn test_toml_paths() {
        let config = AnalysisConfig::from_toml_str(
            "catalog_path = \"data/full.tsv\"\nambiguous_path = \"data/amb.tsv\"\n",
        )
        .unwrap();
        assert_eq!(config.catalog_path, Some(PathBuf::from("data/full.tsv")));
        assert_eq!(config.ambiguous_path, Some(PathBuf::from("data/amb.tsv")));
    }

    #[test]
    fn test_toml_unknown_key() {
        let err = AnalysisConfig::from_toml_str("treshold = 0.8\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_threshold() {
        let err = AnalysisConfig::from_toml_str("threshold = 0.4\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidThreshold(_)));

        let err = AnalysisConfig::from_toml_str("threshold = 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidThreshold(_)));
    }

    #[test]
    fn test_invalid_epsilon() {
        let err = AnalysisConfig::from_toml_str("epsilon = -1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEpsilon(_)));
    }

    #[test]
    fn test_from_vars() {
        let env = vars(&[
            ("HANZI_STATS_THRESHOLD", "0.95"),
            ("HANZI_STATS_CATALOG", "/tmp/catalog.tsv"),
        ]);
        let config = AnalysisConfig::from_vars(|name| env.get(name).cloned()).unwrap();
        assert_eq!(config.threshold, 0.95);
        assert_eq!(config.epsilon, DEFAULT_EPSILON);
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/catalog.tsv")));
        assert!(config.ambiguous_path.is_none());
    }

    #[test]
    fn test_from_vars_bad_number() {
        let env = vars(&[("HANZI_STATS_EPSILON", "tiny")]);
        let err = AnalysisConfig::from_vars(|name| env.get(name).cloned()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::EnvVarParseFailed { ref var_name, .. } if var_name == "HANZI_STATS_EPSILON"
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "threshold = 0.85").unwrap();
        let config = AnalysisConfig::from_file(file.path()).unwrap();
        assert_eq!(config.threshold, 0.85);

        let err = AnalysisConfig::from_file(Path::new("/nonexistent/hanzi.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_bundled_catalog() {
        let catalog = AnalysisConfig::default().load_catalog().unwrap();
        assert!(Arc::ptr_eq(&catalog, &GradeCatalog::bundled().unwrap()));
    }

    #[test]
    fn test_load_catalog_from_files() {
        let mut base = tempfile::NamedTempFile::new().unwrap();
        write!(base, "爱\t愛\t1\n系\t系\t3\n").unwrap();
        let mut ambiguous = tempfile::NamedTempFile::new().unwrap();
        write!(ambiguous, "s2t\t系\t系 係 繫\n").unwrap();

        let config = AnalysisConfig {
            catalog_path: Some(base.path().to_path_buf()),
            ambiguous_path: Some(ambiguous.path().to_path_buf()),
            ..AnalysisConfig::default()
        };
        let catalog = config.load_catalog().unwrap();
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let config = AnalysisConfig {
            catalog_path: Some(PathBuf::from("/nonexistent/catalog.tsv")),
            ..AnalysisConfig::default()
        };
        let err = config.load_catalog().unwrap_err();
        assert!(matches!(err, HanziError::Catalog(CatalogError::Io { .. })));
    }
}
