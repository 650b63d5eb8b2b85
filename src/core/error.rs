//! Error types for the treeseek core.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by [crate::core::SearchCoordinator::start_search].
///
/// Everything that goes wrong during the walk itself is absorbed by the scanner
/// and only reported to the [crate::core::ScanObserver].
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid search request: {0}")]
    InvalidRequest(#[from] InvalidRequest),

    /// The OS refused to start the background search thread.
    #[error("failed to start search thread: {0}")]
    Spawn(#[source] io::Error),
}

impl SearchError {
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, SearchError::InvalidRequest(_))
    }
}

/// Why a search request was rejected before any thread was started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRequest {
    #[error("search pattern is empty")]
    EmptyPattern,

    #[error("search root is empty")]
    EmptyRoot,

    #[error("'{}' is not an existing directory", .0.display())]
    NotADirectory(PathBuf),
}

/// Errors from opening a path with the default application.
#[derive(Debug, Error)]
pub enum OpenError {
    #[error("path does not exist: {0}")]
    NotFound(PathBuf),

    #[error("failed to open {1}: {0}")]
    Io(#[source] io::Error, PathBuf),
}
