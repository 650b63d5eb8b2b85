//! Diagnostics hooks for the search.
//!
//! The scanner and the session never log on their own. They report to a
//! [ScanObserver] handed in by whoever starts the search, so the core has no
//! dependency on a global logger. [LogObserver] is the default used by the
//! application and forwards everything to the `log` facade.

use crate::core::scanner::ScanStats;
use std::path::Path;

/// Receives diagnostics from a running search.
///
/// Called from the background search thread. All methods default to doing nothing.
pub trait ScanObserver: Send + Sync {
    /// An entry could not be read and was skipped.
    fn entry_unreadable(&self, _path: Option<&Path>, _error: &walkdir::Error) {}

    fn session_started(&self, _session: u64, _root: &Path, _pattern: &str) {}

    fn session_finished(&self, _session: u64, _cancelled: bool, _stats: &ScanStats) {}
}

/// Discards all diagnostics.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentObserver;

impl ScanObserver for SilentObserver {}

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl ScanObserver for LogObserver {
    fn entry_unreadable(&self, path: Option<&Path>, error: &walkdir::Error) {
        match path {
            Some(p) => log::debug!("skipping unreadable entry {}: {}", p.display(), error),
            None => log::debug!("skipping unreadable entry: {}", error),
        }
    }

    fn session_started(&self, session: u64, root: &Path, pattern: &str) {
        log::info!(
            "search #{} started in {} for {:?}",
            session,
            root.display(),
            pattern
        );
    }

    fn session_finished(&self, session: u64, cancelled: bool, stats: &ScanStats) {
        log::info!(
            "search #{} {}: {} matches, {} files, {} dirs, {} unreadable",
            session,
            if cancelled { "cancelled" } else { "finished" },
            stats.matches,
            stats.files_seen,
            stats.dirs_seen,
            stats.unreadable
        );
    }
}
