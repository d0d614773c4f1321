// Hanzi-Stats Character Extraction
// Pulls Han characters out of arbitrary text

use once_cell::sync::Lazy;
use regex::Regex;

/// Any character of the Unicode Han script
static HAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{Han}").expect("Han class compiles"));

/// Extract every Han character from `text`, in order, with duplicates
///
/// # Examples
/// ```
/// # use hanzi_stats::extract::filter_text;
/// assert_eq!(filter_text("我爱 Rust，爱它!"), vec!['我', '爱', '爱', '它']);
/// assert!(filter_text("Sing, O goddess").is_empty());
/// ```
pub fn filter_text(text: &str) -> Vec<char> {
    HAN.find_iter(text)
        .flat_map(|m| m.as_str().chars())
        .collect()
}

/// Check whether `text` holds any Han character
#[inline]
pub fn contains_hanzi(text: &str) -> bool {
    HAN.is_match(text)
}
