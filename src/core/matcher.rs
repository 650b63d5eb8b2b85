//! Filename matching for the search.
//!
//! A pattern matches a filename when the case-folded filename contains the
//! case-folded pattern anywhere, i.e. the glob `*pattern*`. The empty pattern
//! matches everything.

use std::borrow::Cow;
use std::ffi::OsStr;

/// Returns true if `filename` contains `pattern`, ignoring case.
pub fn matches(filename: &str, pattern: &str) -> bool {
    Pattern::new(pattern).is_match(filename)
}

/// A search pattern folded once up front.
///
/// Used by the scanner so the pattern is not lowered again for every entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    folded: String,
}

impl Pattern {
    pub fn new(pattern: &str) -> Self {
        Self {
            folded: pattern.to_lowercase(),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.folded
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }

    pub fn is_match(&self, filename: &str) -> bool {
        if self.folded.is_empty() {
            return true;
        }
        fold(filename).contains(self.folded.as_str())
    }

    /// Matches a raw OS file name. Non UTF-8 names are compared lossily.
    pub fn is_match_os(&self, filename: &OsStr) -> bool {
        self.is_match(&filename.to_string_lossy())
    }
}

/// Lowercases only when needed.
fn fold(s: &str) -> Cow<'_, str> {
    if s.chars().any(char::is_uppercase) {
        Cow::Owned(s.to_lowercase())
    } else {
        Cow::Borrowed(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_anywhere_in_name() {
        assert!(matches("report_2024.txt", "2024"));
        assert!(matches("report_2024.txt", "rep"));
        assert!(matches("report_2024.txt", ".txt"));
        assert!(!matches("report_2024.txt", "2025"));
    }

    #[test]
    fn case_is_ignored_on_both_sides() {
        assert!(matches("b.TXT", "txt"));
        assert!(matches("b.txt", "TXT"));
        assert!(matches("ÄRGER.md", "ärger"));
    }

    #[test]
    fn empty_pattern_matches_everything() {
        assert!(matches("anything", ""));
        assert!(matches("", ""));
        assert!(Pattern::new("").is_empty());
    }

    #[test]
    fn pattern_longer_than_name_never_matches() {
        assert!(!matches("a", "ab"));
        assert!(!matches("", "a"));
    }

    #[test]
    fn os_names_are_matched_lossily() {
        let pattern = Pattern::new("crab");
        assert!(pattern.is_match_os(OsStr::new("Crab.rs")));
        assert!(!pattern.is_match_os(OsStr::new("lobster.rs")));
    }
}
