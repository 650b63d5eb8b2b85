//! Search result state shown in the results pane.
//!
//! Holds the query of the latest search, the matches delivered so far and the
//! selected result. The coordinator owns the running search itself; this is
//! only what the UI shows of it.

use crate::core::{ScanOutcome, ScanStats};

use std::path::{Path, PathBuf};

#[derive(Default)]
pub(crate) struct FindState {
    query: String,
    session: Option<u64>,
    results: Vec<PathBuf>,
    selected: usize,
    searching: bool,
    truncated: bool,
    finished: Option<(ScanOutcome, ScanStats)>,
}

impl FindState {
    // Getters / Accessors

    #[inline]
    pub(crate) fn query(&self) -> &str {
        &self.query
    }

    #[inline]
    pub(crate) fn session(&self) -> Option<u64> {
        self.session
    }

    #[inline]
    pub(crate) fn results(&self) -> &[PathBuf] {
        &self.results
    }

    #[inline]
    pub(crate) fn selected(&self) -> usize {
        self.selected
    }

    #[inline]
    pub(crate) fn is_searching(&self) -> bool {
        self.searching
    }

    /// Set when the result limit stopped the search early.
    #[inline]
    pub(crate) fn is_truncated(&self) -> bool {
        self.truncated
    }

    #[inline]
    pub(crate) fn finished(&self) -> Option<&(ScanOutcome, ScanStats)> {
        self.finished.as_ref()
    }

    pub(crate) fn selected_result(&self) -> Option<&Path> {
        self.results.get(self.selected).map(PathBuf::as_path)
    }

    // Lifecycle

    /// Drops the previous results and starts tracking `session`.
    pub(crate) fn begin(&mut self, query: String, session: u64) {
        self.query = query;
        self.session = Some(session);
        self.results.clear();
        self.selected = 0;
        self.searching = true;
        self.truncated = false;
        self.finished = None;
    }

    /// Records a match. Returns `true` for the first match of the search.
    pub(crate) fn push(&mut self, path: PathBuf) -> bool {
        self.results.push(path);
        self.results.len() == 1
    }

    pub(crate) fn mark_truncated(&mut self) {
        self.truncated = true;
    }

    pub(crate) fn finish(&mut self, outcome: ScanOutcome, stats: ScanStats) {
        self.searching = false;
        self.finished = Some((outcome, stats));
    }

    // Selection

    /// Selects the next result, wrapping around. Returns the new selection.
    pub(crate) fn select_next(&mut self) -> Option<&Path> {
        if self.results.is_empty() {
            return None;
        }
        self.selected = (self.selected + 1) % self.results.len();
        self.selected_result()
    }

    /// Selects the previous result, wrapping around. Returns the new selection.
    pub(crate) fn select_prev(&mut self) -> Option<&Path> {
        if self.results.is_empty() {
            return None;
        }
        self.selected = self
            .selected
            .checked_sub(1)
            .unwrap_or(self.results.len() - 1);
        self.selected_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_push_is_reported_once() {
        let mut find = FindState::default();
        find.begin("txt".into(), 4);
        assert!(find.push(PathBuf::from("/a/1.txt")));
        assert!(!find.push(PathBuf::from("/a/2.txt")));
        assert_eq!(find.session(), Some(4));
        assert!(find.is_searching());
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut find = FindState::default();
        assert!(find.select_next().is_none());

        find.begin("x".into(), 1);
        find.push(PathBuf::from("/x1"));
        find.push(PathBuf::from("/x2"));
        find.push(PathBuf::from("/x3"));

        assert_eq!(find.select_prev(), Some(Path::new("/x3")));
        assert_eq!(find.select_next(), Some(Path::new("/x1")));
        assert_eq!(find.select_next(), Some(Path::new("/x2")));
    }

    #[test]
    fn begin_clears_previous_search() {
        let mut find = FindState::default();
        find.begin("x".into(), 1);
        find.push(PathBuf::from("/x1"));
        find.mark_truncated();
        find.finish(ScanOutcome::Cancelled, ScanStats::default());

        find.begin("y".into(), 2);
        assert!(find.results().is_empty());
        assert!(!find.is_truncated());
        assert!(find.finished().is_none());
        assert_eq!(find.query(), "y");
    }
}
