//! The directory scanner behind the filename search.
//!
//! [Scan] is a lazy iterator over a directory subtree. It yields one
//! [ScanEvent::Match] per regular file whose name matches the pattern, and always
//! ends with exactly one [ScanEvent::Complete], whether the walk ran out of
//! entries or was cancelled.
//!
//! The walk is depth first with entries sorted by file name, so two scans of an
//! unchanged tree report matches in the same order. Symlinks are not followed.
//!
//! Entries that cannot be read (permission denied, removed mid-walk, ...) are
//! handed to the [ScanObserver] and skipped. They never end the scan.

use crate::core::cancel::CancelToken;
use crate::core::matcher::Pattern;
use crate::core::observer::ScanObserver;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

/// How a scan ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Every reachable entry was visited.
    Exhausted,
    /// The cancel token was observed before the walk ran out.
    Cancelled,
}

/// Counters collected while walking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub files_seen: u64,
    pub dirs_seen: u64,
    pub matches: u64,
    pub unreadable: u64,
}

/// Items produced by [Scan].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    Match(PathBuf),
    Complete {
        outcome: ScanOutcome,
        stats: ScanStats,
    },
}

/// A lazy filename search over one directory subtree.
pub struct Scan {
    walker: Option<walkdir::IntoIter>,
    pattern: Pattern,
    token: CancelToken,
    observer: Arc<dyn ScanObserver>,
    stats: ScanStats,
    finished: bool,
}

impl Scan {
    /// Prepares a scan of `root`. Nothing is read until the first call to `next`.
    ///
    /// A `root` that does not exist or is not a directory produces an empty scan
    /// that completes normally.
    pub fn new(
        root: &Path,
        pattern: &str,
        token: CancelToken,
        observer: Arc<dyn ScanObserver>,
    ) -> Self {
        let walker = if root.is_dir() {
            let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
            Some(
                WalkDir::new(root)
                    .min_depth(1)
                    .follow_links(false)
                    .sort_by_file_name()
                    .into_iter(),
            )
        } else {
            None
        };

        Self {
            walker,
            pattern: Pattern::new(pattern),
            token,
            observer,
            stats: ScanStats::default(),
            finished: false,
        }
    }

    #[inline]
    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }

    fn finish(&mut self, outcome: ScanOutcome) -> ScanEvent {
        self.finished = true;
        self.walker = None;
        ScanEvent::Complete {
            outcome,
            stats: self.stats,
        }
    }
}

impl Iterator for Scan {
    type Item = ScanEvent;

    fn next(&mut self) -> Option<ScanEvent> {
        if self.finished {
            return None;
        }

        loop {
            if self.token.is_cancelled() {
                return Some(self.finish(ScanOutcome::Cancelled));
            }

            let Some(walker) = self.walker.as_mut() else {
                return Some(self.finish(ScanOutcome::Exhausted));
            };

            let entry = match walker.next() {
                Some(Ok(entry)) => entry,
                Some(Err(err)) => {
                    self.stats.unreadable += 1;
                    self.observer.entry_unreadable(err.path(), &err);
                    continue;
                }
                None => return Some(self.finish(ScanOutcome::Exhausted)),
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                self.stats.dirs_seen += 1;
                continue;
            }
            if !file_type.is_file() {
                continue;
            }

            self.stats.files_seen += 1;
            if !self.pattern.is_match_os(entry.file_name()) {
                continue;
            }

            if self.token.is_cancelled() {
                return Some(self.finish(ScanOutcome::Cancelled));
            }

            self.stats.matches += 1;
            return Some(ScanEvent::Match(entry.into_path()));
        }
    }
}

impl std::iter::FusedIterator for Scan {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::observer::SilentObserver;

    use std::fs::{self, File};
    use std::sync::Mutex;
    use tempfile::tempdir;

    fn silent() -> Arc<dyn ScanObserver> {
        Arc::new(SilentObserver)
    }

    fn matches_of(events: &[ScanEvent]) -> Vec<PathBuf> {
        events
            .iter()
            .filter_map(|e| match e {
                ScanEvent::Match(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn reports_matching_files_then_completes() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("a.txt"))?;
        fs::create_dir(dir.path().join("sub"))?;
        File::create(dir.path().join("sub").join("b.TXT"))?;
        File::create(dir.path().join("sub").join("c.log"))?;

        let events: Vec<_> = Scan::new(dir.path(), "txt", CancelToken::new(), silent()).collect();

        let found = matches_of(&events);
        assert_eq!(
            found,
            vec![dir.path().join("a.txt"), dir.path().join("sub").join("b.TXT")]
        );
        assert!(matches!(
            events.last(),
            Some(ScanEvent::Complete {
                outcome: ScanOutcome::Exhausted,
                stats
            }) if stats.matches == 2 && stats.files_seen == 3 && stats.dirs_seen == 1
        ));
        Ok(())
    }

    #[test]
    fn directories_are_not_reported() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join("crab_dir"))?;
        File::create(dir.path().join("crab_dir").join("inner.rs"))?;

        let events: Vec<_> = Scan::new(dir.path(), "crab", CancelToken::new(), silent()).collect();
        assert!(matches_of(&events).is_empty());
        Ok(())
    }

    #[test]
    fn missing_root_completes_empty() {
        let events: Vec<_> = Scan::new(
            Path::new("/path/does/not/exist"),
            "x",
            CancelToken::new(),
            silent(),
        )
        .collect();
        assert_eq!(
            events,
            vec![ScanEvent::Complete {
                outcome: ScanOutcome::Exhausted,
                stats: ScanStats::default()
            }]
        );
    }

    #[test]
    fn file_root_completes_empty() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let file = dir.path().join("match_me.txt");
        File::create(&file)?;

        let events: Vec<_> = Scan::new(&file, "match", CancelToken::new(), silent()).collect();
        assert_eq!(events.len(), 1);
        assert!(matches_of(&events).is_empty());
        Ok(())
    }

    #[test]
    fn cancelled_before_start_yields_only_completion() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("a.txt"))?;
        let token = CancelToken::new();
        token.cancel();

        let events: Vec<_> = Scan::new(dir.path(), "a", token, silent()).collect();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            ScanEvent::Complete {
                outcome: ScanOutcome::Cancelled,
                ..
            }
        ));
        Ok(())
    }

    #[test]
    fn cancel_mid_walk_stops_at_next_step() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        for i in 0..10 {
            File::create(dir.path().join(format!("hit_{i}.txt")))?;
        }
        let token = CancelToken::new();
        let mut scan = Scan::new(dir.path(), "hit", token.clone(), silent());

        assert!(matches!(scan.next(), Some(ScanEvent::Match(_))));
        token.cancel();
        assert!(matches!(
            scan.next(),
            Some(ScanEvent::Complete {
                outcome: ScanOutcome::Cancelled,
                stats
            }) if stats.matches == 1
        ));
        assert_eq!(scan.next(), None);
        assert_eq!(scan.next(), None);
        Ok(())
    }

    #[test]
    fn repeated_scans_report_same_order() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        for sub in ["zeta", "alpha", "mid"] {
            let d = dir.path().join(sub);
            fs::create_dir(&d)?;
            for name in ["q_item.dat", "a_item.dat", "m_item.dat"] {
                File::create(d.join(name))?;
            }
        }

        let first: Vec<_> = Scan::new(dir.path(), "item", CancelToken::new(), silent()).collect();
        let second: Vec<_> = Scan::new(dir.path(), "ITEM", CancelToken::new(), silent()).collect();
        let (first, second) = (matches_of(&first), matches_of(&second));
        assert_eq!(first.len(), 9);
        assert_eq!(first, second);
        assert_eq!(first[0], dir.path().join("alpha").join("a_item.dat"));
        Ok(())
    }

    #[derive(Default)]
    struct Recording {
        unreadable: Mutex<Vec<Option<PathBuf>>>,
    }

    impl ScanObserver for Recording {
        fn entry_unreadable(&self, path: Option<&Path>, _error: &walkdir::Error) {
            if let Ok(mut seen) = self.unreadable.lock() {
                seen.push(path.map(Path::to_path_buf));
            }
        }
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_directory_does_not_stop_siblings() -> Result<(), Box<dyn std::error::Error>> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir()?;
        let locked = dir.path().join("b_locked");
        fs::create_dir(&locked)?;
        File::create(locked.join("hidden_note.txt"))?;
        File::create(dir.path().join("a_note.txt"))?;
        File::create(dir.path().join("c_note.txt"))?;
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;

        let observer = Arc::new(Recording::default());
        let events: Vec<_> = Scan::new(
            dir.path(),
            "note",
            CancelToken::new(),
            observer.clone(),
        )
        .collect();

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;

        let found = matches_of(&events);
        assert!(found.contains(&dir.path().join("a_note.txt")));
        assert!(found.contains(&dir.path().join("c_note.txt")));
        assert!(matches!(events.last(), Some(ScanEvent::Complete { .. })));

        // Running as root bypasses the permission bits, then nothing is unreadable.
        let unreadable = observer.unreadable.lock().map_err(|_| "poisoned")?.len() as u64;
        if let Some(ScanEvent::Complete { stats, .. }) = events.last() {
            assert_eq!(stats.unreadable, unreadable);
        }
        Ok(())
    }

    #[test]
    fn vanished_directory_is_counted_and_skipped() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let gone = dir.path().join("b_dir");
        File::create(dir.path().join("a_note.txt"))?;
        fs::create_dir(&gone)?;
        File::create(gone.join("x_note.txt"))?;
        File::create(dir.path().join("c_note.txt"))?;

        let observer = Arc::new(Recording::default());
        let mut scan = Scan::new(dir.path(), "note", CancelToken::new(), observer.clone());

        assert_eq!(
            scan.next(),
            Some(ScanEvent::Match(dir.path().join("a_note.txt")))
        );
        fs::remove_dir_all(&gone)?;
        let rest: Vec<_> = scan.collect();

        assert_eq!(matches_of(&rest), vec![dir.path().join("c_note.txt")]);
        match rest.last() {
            Some(ScanEvent::Complete { outcome, stats }) => {
                assert_eq!(*outcome, ScanOutcome::Exhausted);
                assert_eq!(stats.unreadable, 1);
                assert_eq!(stats.matches, 2);
            }
            other => return Err(format!("unexpected event {:?}", other).into()),
        }
        let seen = observer.unreadable.lock().map_err(|_| "poisoned")?;
        assert_eq!(seen.as_slice(), &[Some(gone)]);
        Ok(())
    }
}
