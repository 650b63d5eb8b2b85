//! Core runtime logic for treeseek.
//!
//! This module contains the non-UI "engine" pieces:
//! - [matcher]: case-insensitive substring matching of file names.
//! - [cancel]: the [CancelToken] shared with a running scan.
//! - [scanner]: the lazy, cancellable directory walk ([Scan]).
//! - [session]: one scan on its own thread ([SearchSession]).
//! - [coordinator]: the single entry point for searches ([SearchCoordinator]).
//! - [observer]: diagnostics hooks injected into the search.
//! - [fm]: one-level directory listing for the tree pane.
//! - [opener]: opening paths with the default application.
//! - [terminal]: terminal setup/teardown and the main event loop.

pub mod cancel;
pub mod coordinator;
pub mod error;
pub mod fm;
pub mod matcher;
pub mod observer;
pub mod opener;
pub mod scanner;
pub mod session;
pub mod terminal;

pub use cancel::CancelToken;
pub use coordinator::{CoordinatorState, SearchCoordinator, SearchEvent};
pub use error::{InvalidRequest, OpenError, SearchError};
pub use fm::{FileEntry, ListOptions, browse_dir};
pub use matcher::{Pattern, matches};
pub use observer::{LogObserver, ScanObserver, SilentObserver};
pub use opener::{Opened, Opener, SystemOpener, open_path};
pub use scanner::{Scan, ScanEvent, ScanOutcome, ScanStats};
pub use session::{FnSink, SearchRequest, SearchSession, SearchSink, SessionState};
