// Data loader for embedded catalog files
// Loads the bundled HSK catalog and ambiguous mappings at compile time

/// Embedded grade catalog (simplified, traditional, grade)
pub const CATALOG_DATA: &str = include_str!("../data/hsk_catalog.tsv");

/// Embedded ambiguous simplified/traditional mappings
pub const AMBIGUOUS_DATA: &str = include_str!("../data/ambiguous.tsv");

/// Data loader utility
pub struct DataLoader;

impl DataLoader {
    /// Get the grade catalog rows
    pub fn catalog_data() -> &'static str {
        CATALOG_DATA
    }

    /// Get the ambiguous mapping rows
    pub fn ambiguous_data() -> &'static str {
        AMBIGUOUS_DATA
    }

    /// Get all data info
    pub fn info() -> DataInfo {
        DataInfo {
            catalog_size: CATALOG_DATA.len(),
            ambiguous_size: AMBIGUOUS_DATA.len(),
            total_size: CATALOG_DATA.len() + AMBIGUOUS_DATA.len(),
        }
    }
}

/// Information about embedded data
#[derive(Debug, Clone)]
pub struct DataInfo {
    /// Size of the grade catalog in bytes
    pub catalog_size: usize,
    /// Size of the ambiguous mappings in bytes
    pub ambiguous_size: usize,
    /// Total size of all embedded data
    pub total_size: usize,
}
