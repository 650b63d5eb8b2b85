//! Miscellaneous utility functions for treeseek.
//!
//! - [cli]: command line parsing and help output
//! - [helpers]: path helpers and the search result limits
//! - [logging]: log file setup

pub mod cli;
pub mod helpers;
pub mod logging;

pub use helpers::{
    DEFAULT_MAX_RESULTS, MAX_MAX_RESULTS, MIN_MAX_RESULTS, clamp_max_results, expand_home_path,
    filesystem_root, get_home, resolve_initial_dir, shorten_home_path,
};
pub use logging::init_logging;
