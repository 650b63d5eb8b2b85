//! The search front door used by the rest of treeseek.
//!
//! [SearchCoordinator] owns at most one [SearchSession] at a time. Starting a
//! search stops and joins the previous one before the new thread is spawned, so
//! two scans never run side by side.
//!
//! Results travel from the background thread to the caller through an unbounded
//! crossbeam channel. The caller pulls them with [SearchCoordinator::try_next_event]
//! (or the blocking variants) whenever it is ready, e.g. once per UI tick. Each
//! event is tagged with its session id and only events of the current session
//! are handed out, events of a superseded search still sitting in the channel are
//! dropped.

use crate::core::error::SearchError;
use crate::core::observer::{LogObserver, ScanObserver};
use crate::core::scanner::{ScanOutcome, ScanStats};
use crate::core::session::{SearchRequest, SearchSession, SearchSink};

use crossbeam_channel::{Receiver, Sender, unbounded};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Events delivered to the consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    Match {
        session: u64,
        path: PathBuf,
    },
    /// Always the last event of a session, also after a cancel.
    Complete {
        session: u64,
        outcome: ScanOutcome,
        stats: ScanStats,
    },
}

impl SearchEvent {
    #[inline]
    pub fn session(&self) -> u64 {
        match self {
            SearchEvent::Match { session, .. } | SearchEvent::Complete { session, .. } => *session,
        }
    }
}

/// Whether a scan currently holds the active slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    Idle,
    Searching,
}

/// Forwards session output into the coordinator channel.
struct ChannelSink {
    session: u64,
    tx: Sender<SearchEvent>,
}

impl SearchSink for ChannelSink {
    fn on_match(&mut self, path: PathBuf) {
        let _ = self.tx.send(SearchEvent::Match {
            session: self.session,
            path,
        });
    }

    fn on_complete(&mut self, outcome: ScanOutcome, stats: ScanStats) {
        let _ = self.tx.send(SearchEvent::Complete {
            session: self.session,
            outcome,
            stats,
        });
    }
}

pub struct SearchCoordinator {
    event_tx: Sender<SearchEvent>,
    event_rx: Receiver<SearchEvent>,
    active: Option<SearchSession>,
    // Session whose events are still handed out. Outlives `active` after a cancel
    // until its completion has been delivered.
    current: Option<u64>,
    last_id: u64,
    observer: Arc<dyn ScanObserver>,
}

impl Default for SearchCoordinator {
    fn default() -> Self {
        Self::new(Arc::new(LogObserver))
    }
}

impl SearchCoordinator {
    pub fn new(observer: Arc<dyn ScanObserver>) -> Self {
        let (event_tx, event_rx) = unbounded();
        Self {
            event_tx,
            event_rx,
            active: None,
            current: None,
            last_id: 0,
            observer,
        }
    }

    // Getters / Accessors

    pub fn state(&self) -> CoordinatorState {
        if self.active.is_some() {
            CoordinatorState::Searching
        } else {
            CoordinatorState::Idle
        }
    }

    #[inline]
    pub fn is_searching(&self) -> bool {
        self.active.is_some()
    }

    /// Id of the session holding the active slot.
    pub fn active_session(&self) -> Option<u64> {
        self.active.as_ref().map(SearchSession::id)
    }

    /// True while a completion is still owed to the caller.
    #[inline]
    pub fn awaiting_completion(&self) -> bool {
        self.current.is_some()
    }

    // Commands

    /// Starts a new search, retiring the current one first.
    ///
    /// Rejects an empty pattern and a root that is not an existing directory, in
    /// which case the running search, if any, is left untouched.
    /// Returns the id of the new session.
    pub fn start_search(
        &mut self,
        root: impl AsRef<Path>,
        pattern: &str,
    ) -> Result<u64, SearchError> {
        let request = SearchRequest::new(root.as_ref(), pattern);
        request.validate()?;

        self.retire_active();

        self.last_id = self.last_id.wrapping_add(1);
        let id = self.last_id;

        let mut session = SearchSession::new(id, request);
        let sink = ChannelSink {
            session: id,
            tx: self.event_tx.clone(),
        };
        session
            .start(sink, Arc::clone(&self.observer))
            .map_err(SearchError::Spawn)?;

        self.active = Some(session);
        self.current = Some(id);
        Ok(id)
    }

    /// Stops the active search. Its remaining matches and its completion are still
    /// delivered. Does nothing if no search is active.
    pub fn cancel_active(&mut self) {
        if let Some(mut session) = self.active.take() {
            session.stop();
        }
    }

    // Event delivery

    /// Next event of the current session, without blocking.
    pub fn try_next_event(&mut self) -> Option<SearchEvent> {
        while let Ok(event) = self.event_rx.try_recv() {
            if let Some(event) = self.accept(event) {
                return Some(event);
            }
        }
        None
    }

    /// Next event of the current session, waiting up to `timeout`.
    ///
    /// A timeout too large to add to the current instant waits without limit.
    pub fn next_event_timeout(&mut self, timeout: Duration) -> Option<SearchEvent> {
        let deadline = Instant::now().checked_add(timeout);
        loop {
            let event = match deadline {
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    self.event_rx.recv_timeout(remaining).ok()?
                }
                None => self.event_rx.recv().ok()?,
            };
            if let Some(event) = self.accept(event) {
                return Some(event);
            }
        }
    }

    /// Everything currently queued for the current session.
    pub fn drain_events(&mut self) -> Vec<SearchEvent> {
        let mut out = Vec::new();
        while let Some(event) = self.try_next_event() {
            out.push(event);
        }
        out
    }

    // Helpers

    /// Stops and joins the active session and forgets everything it queued.
    fn retire_active(&mut self) {
        if let Some(mut session) = self.active.take() {
            session.stop();
        }
        self.current = None;
        // Only retired sessions can have anything queued at this point.
        while self.event_rx.try_recv().is_ok() {}
    }

    fn accept(&mut self, event: SearchEvent) -> Option<SearchEvent> {
        if self.current != Some(event.session()) {
            return None;
        }

        if let SearchEvent::Complete { .. } = event {
            self.current = None;
            // The thread has sent its last event, joining here just reaps it.
            if let Some(mut session) = self.active.take() {
                session.stop();
            }
        }
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::observer::SilentObserver;

    use std::fs::{self, File};
    use tempfile::tempdir;

    const WAIT: Duration = Duration::from_secs(5);

    fn coordinator() -> SearchCoordinator {
        SearchCoordinator::new(Arc::new(SilentObserver))
    }

    /// Pulls events until the completion of the current session.
    fn collect_until_complete(coord: &mut SearchCoordinator) -> Vec<SearchEvent> {
        let mut out = Vec::new();
        while let Some(event) = coord.next_event_timeout(WAIT) {
            let done = matches!(event, SearchEvent::Complete { .. });
            out.push(event);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn empty_pattern_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let mut coord = coordinator();
        let err = coord.start_search(dir.path(), "").err().ok_or("expected an error")?;
        assert!(err.is_invalid_request());
        assert_eq!(coord.state(), CoordinatorState::Idle);
        Ok(())
    }

    #[test]
    fn invalid_request_leaves_running_search_alone() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("keep.txt"))?;
        let mut coord = coordinator();

        let id = coord.start_search(dir.path(), "keep")?;
        assert!(coord.start_search("", "keep").is_err());
        assert!(coord.awaiting_completion());

        let events = collect_until_complete(&mut coord);
        assert!(events.iter().all(|e| e.session() == id));
        assert!(events.iter().any(|e| matches!(e, SearchEvent::Match { .. })));
        Ok(())
    }

    #[test]
    fn completion_returns_to_idle() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("a.txt"))?;
        let mut coord = coordinator();

        coord.start_search(dir.path(), "txt")?;
        assert_eq!(coord.state(), CoordinatorState::Searching);

        let events = collect_until_complete(&mut coord);
        assert!(matches!(
            events.last(),
            Some(SearchEvent::Complete {
                outcome: ScanOutcome::Exhausted,
                ..
            })
        ));
        assert_eq!(coord.state(), CoordinatorState::Idle);
        assert!(!coord.awaiting_completion());
        assert!(coord.try_next_event().is_none());
        Ok(())
    }

    #[test]
    fn cancel_still_delivers_one_completion() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        for i in 0..200 {
            File::create(dir.path().join(format!("f_{i:03}.log")))?;
        }
        let mut coord = coordinator();

        let id = coord.start_search(dir.path(), "log")?;
        coord.cancel_active();
        assert_eq!(coord.state(), CoordinatorState::Idle);

        let events = coord.drain_events();
        let completions: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, SearchEvent::Complete { .. }))
            .collect();
        assert_eq!(completions.len(), 1);
        assert_eq!(completions[0].session(), id);
        assert!(matches!(events.last(), Some(SearchEvent::Complete { .. })));
        assert!(coord.try_next_event().is_none());
        Ok(())
    }

    #[test]
    fn cancel_with_nothing_active_is_a_no_op() {
        let mut coord = coordinator();
        coord.cancel_active();
        coord.cancel_active();
        assert_eq!(coord.state(), CoordinatorState::Idle);
        assert!(coord.try_next_event().is_none());
    }

    #[test]
    fn new_search_supersedes_old_one() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        for d in 0..10 {
            let sub = dir.path().join(format!("d{d}"));
            fs::create_dir(&sub)?;
            for f in 0..30 {
                File::create(sub.join(format!("x_{f}.dat")))?;
                File::create(sub.join(format!("y_{f}.dat")))?;
            }
        }
        let mut coord = coordinator();

        let first = coord.start_search(dir.path(), "x_")?;
        let second = coord.start_search(dir.path(), "y_")?;
        assert_ne!(first, second);
        assert_eq!(coord.active_session(), Some(second));

        let events = collect_until_complete(&mut coord);
        assert!(events.iter().all(|e| e.session() == second));
        for event in &events {
            if let SearchEvent::Match { path, .. } = event {
                let name = path.file_name().and_then(|n| n.to_str()).ok_or("bad name")?;
                assert!(name.starts_with("y_"), "stale match leaked: {name}");
            }
        }
        let matched = events
            .iter()
            .filter(|e| matches!(e, SearchEvent::Match { .. }))
            .count();
        assert_eq!(matched, 300);
        Ok(())
    }

    #[test]
    fn unbounded_wait_returns_next_event() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("only.txt"))?;
        let mut coord = coordinator();

        let id = coord.start_search(dir.path(), "only")?;
        let first = coord.next_event_timeout(Duration::MAX);
        assert_eq!(
            first,
            Some(SearchEvent::Match {
                session: id,
                path: dir.path().join("only.txt"),
            })
        );
        let last = coord.next_event_timeout(Duration::MAX);
        assert!(matches!(last, Some(SearchEvent::Complete { .. })));
        assert!(!coord.awaiting_completion());
        Ok(())
    }
}
