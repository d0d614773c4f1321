// Hanzi-Stats Grade Catalog
// Characters indexed by simplified and traditional form, with HSK grades

use crate::data::DataLoader;
use crate::types::{CatalogError, Script, BEYOND_GRADE};
use once_cell::sync::OnceCell;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

static BUNDLED: OnceCell<Arc<GradeCatalog>> = OnceCell::new();

/// One simplified/traditional pairing and its grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CatalogEntry {
    pub simplified: char,
    pub traditional: char,
    pub grade: u8,
}

impl CatalogEntry {
    /// The character in the given column
    #[inline]
    pub fn key(&self, script: Script) -> char {
        match script {
            Script::Simplified => self.simplified,
            Script::Traditional => self.traditional,
        }
    }
}

/// Immutable grade catalog with both columns indexed
///
/// Ambiguous mappings are kept as separate entries, so one simplified
/// character can own several rows (系 → 系, 係, 繫) and one traditional
/// character can be reached from several simplified ones (着, 著 → 著).
#[derive(Debug, Clone)]
pub struct GradeCatalog {
    entries: Vec<CatalogEntry>,

    /// Simplified character → entry indices
    by_simplified: FxHashMap<char, Vec<usize>>,

    /// Traditional character → entry indices
    by_traditional: FxHashMap<char, Vec<usize>>,
}

impl GradeCatalog {
    /// Shared handle to the embedded catalog, built on first use
    pub fn bundled() -> Result<Arc<GradeCatalog>, CatalogError> {
        BUNDLED
            .get_or_try_init(|| {
                GradeCatalog::from_tsv(DataLoader::catalog_data(), DataLoader::ambiguous_data())
                    .map(Arc::new)
            })
            .cloned()
    }

    /// Parse a catalog from its base rows and ambiguous mapping rows
    ///
    /// Base rows are `simplified<TAB>traditional<TAB>grade`. Ambiguous rows
    /// are `s2t<TAB>simplified<TAB>forms...` or `t2s<TAB>traditional<TAB>forms...`
    /// with space-separated forms. Blank lines and `#` comments are skipped.
    pub fn from_tsv(base: &str, ambiguous: &str) -> Result<Self, CatalogError> {
        let base_rows = parse_base(base)?;
        let mappings = parse_ambiguous(ambiguous)?;

        let grades: FxHashMap<char, u8> = base_rows
            .iter()
            .map(|entry| (entry.simplified, entry.grade))
            .collect();

        let one_to_many: FxHashMap<char, &[char]> = mappings
            .iter()
            .filter(|m| m.direction == Direction::SimplifiedToTraditional)
            .map(|m| (m.head, m.forms.as_slice()))
            .collect();

        let mut seen: FxHashSet<(char, char)> = FxHashSet::default();
        let mut entries = Vec::with_capacity(base_rows.len() + mappings.len());
        let mut push = |entry: CatalogEntry, entries: &mut Vec<CatalogEntry>| {
            if seen.insert((entry.simplified, entry.traditional)) {
                entries.push(entry);
            }
        };

        // s2t rows replace the base pairing of their simplified character
        for row in &base_rows {
            match one_to_many.get(&row.simplified) {
                Some(forms) => {
                    for &traditional in forms.iter() {
                        push(
                            CatalogEntry {
                                traditional,
                                ..*row
                            },
                            &mut entries,
                        );
                    }
                }
                None => push(*row, &mut entries),
            }
        }

        for mapping in &mappings {
            match mapping.direction {
                Direction::SimplifiedToTraditional => {
                    if !grades.contains_key(&mapping.head) {
                        debug!(character = %mapping.head, "Skipping s2t mapping outside catalog");
                    }
                }
                Direction::TraditionalToSimplified => {
                    for &simplified in &mapping.forms {
                        match grades.get(&simplified) {
                            Some(&grade) => push(
                                CatalogEntry {
                                    simplified,
                                    traditional: mapping.head,
                                    grade,
                                },
                                &mut entries,
                            ),
                            None => {
                                debug!(character = %simplified, "Skipping t2s form outside catalog")
                            }
                        }
                    }
                }
            }
        }

        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        let catalog = Self::from_entries(entries);
        info!(
            entries = catalog.len(),
            simplified = catalog.by_simplified.len(),
            traditional = catalog.by_traditional.len(),
            "Grade catalog loaded"
        );
        Ok(catalog)
    }

    /// Load a catalog from files; without an ambiguous file every pairing
    /// is taken as listed
    pub fn from_paths(base: &Path, ambiguous: Option<&Path>) -> Result<Self, CatalogError> {
        let base_text = read_file(base)?;
        let ambiguous_text = match ambiguous {
            Some(path) => read_file(path)?,
            None => String::new(),
        };
        Self::from_tsv(&base_text, &ambiguous_text)
    }

    fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        let mut by_simplified: FxHashMap<char, Vec<usize>> = FxHashMap::default();
        let mut by_traditional: FxHashMap<char, Vec<usize>> = FxHashMap::default();

        for (idx, entry) in entries.iter().enumerate() {
            by_simplified.entry(entry.simplified).or_default().push(idx);
            by_traditional.entry(entry.traditional).or_default().push(idx);
        }

        Self {
            entries,
            by_simplified,
            by_traditional,
        }
    }

    #[inline]
    fn index(&self, script: Script) -> &FxHashMap<char, Vec<usize>> {
        match script {
            Script::Simplified => &self.by_simplified,
            Script::Traditional => &self.by_traditional,
        }
    }

    /// Entries whose `script` column holds `character`
    pub fn rows_for(
        &self,
        character: char,
        script: Script,
    ) -> impl Iterator<Item = &CatalogEntry> + '_ {
        self.index(script)
            .get(&character)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.entries[idx])
    }

    /// Check whether `character` appears in the `script` column
    #[inline]
    pub fn contains(&self, character: char, script: Script) -> bool {
        self.index(script).contains_key(&character)
    }

    /// Grade of a character, the lowest one if ambiguous mappings place it
    /// in several grades
    pub fn grade_of(&self, character: char, script: Script) -> Option<u8> {
        self.rows_for(character, script).map(|e| e.grade).min()
    }

    /// Forms of `character` in the other column, in catalog order
    ///
    /// # Example
    /// ```
    /// # use hanzi_stats::{GradeCatalog, Script};
    /// let catalog = GradeCatalog::bundled().unwrap();
    /// assert_eq!(catalog.counterparts('系', Script::Simplified), vec!['系', '係', '繫']);
    /// ```
    pub fn counterparts(&self, character: char, script: Script) -> Vec<char> {
        let other = script.other();
        let mut forms: Vec<char> = Vec::new();
        for entry in self.rows_for(character, script) {
            let form = entry.key(other);
            if !forms.contains(&form) {
                forms.push(form);
            }
        }
        forms
    }

    /// All entries in catalog order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct characters in a column
    pub fn distinct_count(&self, script: Script) -> usize {
        self.index(script).len()
    }

    /// Get counts of entries by grade
    ///
    /// # Returns
    /// FxHashMap with grade → entry count
    pub fn grade_sizes(&self) -> FxHashMap<u8, usize> {
        let mut sizes: FxHashMap<u8, usize> = FxHashMap::default();
        for entry in &self.entries {
            *sizes.entry(entry.grade).or_insert(0) += 1;
        }
        sizes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    SimplifiedToTraditional,
    TraditionalToSimplified,
}

#[derive(Debug)]
struct Mapping {
    direction: Direction,
    head: char,
    forms: Vec<char>,
}

fn read_file(path: &Path) -> Result<String, CatalogError> {
    std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Non-empty, non-comment lines with 1-based line numbers
fn data_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
}

fn single_char(field: &str, line: usize) -> Result<char, CatalogError> {
    let mut chars = field.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(CatalogError::NotSingleCharacter {
            line,
            field: field.to_string(),
        }),
    }
}

fn parse_base(text: &str) -> Result<Vec<CatalogEntry>, CatalogError> {
    let mut rows = Vec::new();
    let mut grades: FxHashMap<char, u8> = FxHashMap::default();

    for (line, content) in data_lines(text) {
        let fields: Vec<&str> = content.split('\t').collect();
        let [simplified, traditional, grade] = fields.as_slice() else {
            return Err(CatalogError::MalformedRow {
                line,
                content: content.to_string(),
            });
        };

        let simplified = single_char(simplified, line)?;
        let traditional = single_char(traditional, line)?;
        let grade = grade
            .trim()
            .parse::<u8>()
            .ok()
            .filter(|g| (1..=BEYOND_GRADE).contains(g))
            .ok_or_else(|| CatalogError::InvalidGrade {
                line,
                value: grade.to_string(),
            })?;

        if let Some(&existing) = grades.get(&simplified) {
            return Err(CatalogError::DuplicateCharacter {
                line,
                character: simplified,
                grade: existing,
            });
        }
        grades.insert(simplified, grade);

        rows.push(CatalogEntry {
            simplified,
            traditional,
            grade,
        });
    }

    Ok(rows)
}

fn parse_ambiguous(text: &str) -> Result<Vec<Mapping>, CatalogError> {
    let mut mappings = Vec::new();

    for (line, content) in data_lines(text) {
        let fields: Vec<&str> = content.split('\t').collect();
        let [direction, head, forms] = fields.as_slice() else {
            return Err(CatalogError::MalformedRow {
                line,
                content: content.to_string(),
            });
        };

        let direction = match direction.trim() {
            "s2t" => Direction::SimplifiedToTraditional,
            "t2s" => Direction::TraditionalToSimplified,
            other => {
                return Err(CatalogError::UnknownDirection {
                    line,
                    direction: other.to_string(),
                })
            }
        };
        let head = single_char(head, line)?;
        let forms = forms
            .split_whitespace()
            .map(|form| single_char(form, line))
            .collect::<Result<Vec<char>, _>>()?;

        if forms.is_empty() {
            return Err(CatalogError::MalformedRow {
                line,
                content: content.to_string(),
            });
        }

        mappings.push(Mapping {
            direction,
            head,
            forms,
        });
    }

    Ok(mappings)
}
