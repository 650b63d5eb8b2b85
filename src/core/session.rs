//! A single search run on its own background thread.
//!
//! [SearchSession] owns one [Scan] and the [CancelToken] that stops it. Every
//! event the scan produces is forwarded to a [SearchSink] from the background
//! thread, and the sink's `on_complete` runs exactly once per started session.
//!
//! [SearchSession::stop] cancels and joins, so once it returns the sink will not
//! be called again for that session.

use crate::core::cancel::CancelToken;
use crate::core::error::InvalidRequest;
use crate::core::observer::ScanObserver;
use crate::core::scanner::{Scan, ScanEvent, ScanOutcome, ScanStats};

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// What to search for and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    root: PathBuf,
    pattern: String,
}

impl SearchRequest {
    pub fn new(root: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            pattern: pattern.into(),
        }
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[inline]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Checks the request against the filesystem as it is right now.
    pub fn validate(&self) -> Result<(), InvalidRequest> {
        if self.pattern.is_empty() {
            return Err(InvalidRequest::EmptyPattern);
        }
        if self.root.as_os_str().is_empty() {
            return Err(InvalidRequest::EmptyRoot);
        }
        if !self.root.is_dir() {
            return Err(InvalidRequest::NotADirectory(self.root.clone()));
        }
        Ok(())
    }
}

/// Receives the results of one session on the background thread.
pub trait SearchSink: Send + 'static {
    fn on_match(&mut self, path: PathBuf);

    fn on_complete(&mut self, outcome: ScanOutcome, stats: ScanStats);
}

/// A [SearchSink] made of two closures.
pub struct FnSink<M, C> {
    on_match: M,
    on_complete: Option<C>,
}

impl<M, C> FnSink<M, C>
where
    M: FnMut(PathBuf) + Send + 'static,
    C: FnOnce(ScanOutcome, ScanStats) + Send + 'static,
{
    pub fn new(on_match: M, on_complete: C) -> Self {
        Self {
            on_match,
            on_complete: Some(on_complete),
        }
    }
}

impl<M, C> SearchSink for FnSink<M, C>
where
    M: FnMut(PathBuf) + Send + 'static,
    C: FnOnce(ScanOutcome, ScanStats) + Send + 'static,
{
    fn on_match(&mut self, path: PathBuf) {
        (self.on_match)(path);
    }

    fn on_complete(&mut self, outcome: ScanOutcome, stats: ScanStats) {
        if let Some(done) = self.on_complete.take() {
            done(outcome, stats);
        }
    }
}

/// Lifecycle of a session. `Cancelled` and `Completed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Created,
    Running,
    Cancelled,
    Completed,
}

impl SessionState {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Cancelled | SessionState::Completed)
    }
}

pub struct SearchSession {
    id: u64,
    request: SearchRequest,
    token: CancelToken,
    handle: Option<JoinHandle<ScanOutcome>>,
    state: SessionState,
}

impl SearchSession {
    pub fn new(id: u64, request: SearchRequest) -> Self {
        Self {
            id,
            request,
            token: CancelToken::new(),
            handle: None,
            state: SessionState::Created,
        }
    }

    // Getters / Accessors

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// True once the background thread has returned, or if it never ran.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(|h| h.is_finished())
    }

    /// Spawns the background scan. Only the first call on a created session does anything.
    ///
    /// Fails only if the OS refuses to create the thread.
    pub fn start<S: SearchSink>(
        &mut self,
        sink: S,
        observer: Arc<dyn ScanObserver>,
    ) -> io::Result<()> {
        if self.state != SessionState::Created {
            return Ok(());
        }

        let id = self.id;
        let token = self.token.clone();
        let request = self.request.clone();

        let handle = thread::Builder::new()
            .name(format!("tsk-search-{id}"))
            .spawn(move || run_scan(id, &request, token, sink, observer))?;

        self.handle = Some(handle);
        self.state = SessionState::Running;
        Ok(())
    }

    /// Cancels the scan and blocks until the background thread has exited.
    ///
    /// Safe to call any number of times and in any state.
    pub fn stop(&mut self) -> SessionState {
        self.token.cancel();

        if let Some(handle) = self.handle.take() {
            self.state = match handle.join() {
                Ok(ScanOutcome::Exhausted) => SessionState::Completed,
                Ok(ScanOutcome::Cancelled) | Err(_) => SessionState::Cancelled,
            };
        } else if self.state == SessionState::Created {
            self.state = SessionState::Cancelled;
        }
        self.state
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Body of the background thread.
fn run_scan<S: SearchSink>(
    id: u64,
    request: &SearchRequest,
    token: CancelToken,
    sink: S,
    observer: Arc<dyn ScanObserver>,
) -> ScanOutcome {
    observer.session_started(id, request.root(), request.pattern());

    let mut guard = CompletionGuard::new(sink);
    let mut outcome = ScanOutcome::Cancelled;

    let scan = Scan::new(
        request.root(),
        request.pattern(),
        token,
        Arc::clone(&observer),
    );
    for event in scan {
        match event {
            ScanEvent::Match(path) => guard.sink.on_match(path),
            ScanEvent::Complete {
                outcome: done,
                stats,
            } => {
                observer.session_finished(id, done == ScanOutcome::Cancelled, &stats);
                guard.complete(done, stats);
                outcome = done;
            }
        }
    }
    outcome
}

/// Makes sure `on_complete` fires once, also when the scan unwinds.
struct CompletionGuard<S: SearchSink> {
    sink: S,
    completed: bool,
}

impl<S: SearchSink> CompletionGuard<S> {
    fn new(sink: S) -> Self {
        Self {
            sink,
            completed: false,
        }
    }

    fn complete(&mut self, outcome: ScanOutcome, stats: ScanStats) {
        if self.completed {
            return;
        }
        self.completed = true;
        self.sink.on_complete(outcome, stats);
    }
}

impl<S: SearchSink> Drop for CompletionGuard<S> {
    fn drop(&mut self) {
        self.complete(ScanOutcome::Cancelled, ScanStats::default());
    }
}
