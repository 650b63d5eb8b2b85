//! The general and search settings for treeseek.
//!
//! [General] and [Search] are deserialized straight from `treeseek.toml`.
//! [InternalGeneral] and [InternalSearch] are the processed versions used at runtime.

use crate::core::ListOptions;
use crate::utils::{DEFAULT_MAX_RESULTS, clamp_max_results, expand_home_path};

use log::LevelFilter;
use serde::Deserialize;

use std::path::PathBuf;

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct General {
    dirs_first: bool,
    show_hidden: bool,
    start_dir: Option<String>,
    log_level: String,
    log_file: Option<String>,
}

impl Default for General {
    fn default() -> Self {
        General {
            dirs_first: true,
            show_hidden: false,
            start_dir: None,
            log_level: "info".into(),
            log_file: None,
        }
    }
}

#[derive(Debug)]
pub struct InternalGeneral {
    list_options: ListOptions,
    start_dir: Option<PathBuf>,
    log_level: LevelFilter,
    log_file: Option<PathBuf>,
}

impl From<General> for InternalGeneral {
    fn from(g: General) -> Self {
        let log_level = g.log_level.parse().unwrap_or_else(|_| {
            eprintln!(
                "[Warning] unknown log_level {:?}, using \"info\"",
                g.log_level
            );
            LevelFilter::Info
        });

        Self {
            list_options: ListOptions {
                dirs_first: g.dirs_first,
                show_hidden: g.show_hidden,
            },
            start_dir: g
                .start_dir
                .filter(|s| !s.trim().is_empty())
                .map(|s| expand_home_path(&s)),
            log_level,
            log_file: g
                .log_file
                .filter(|s| !s.trim().is_empty())
                .map(|s| expand_home_path(&s)),
        }
    }
}

impl InternalGeneral {
    #[inline]
    pub fn list_options(&self) -> ListOptions {
        self.list_options
    }

    #[inline]
    pub fn start_dir(&self) -> Option<&PathBuf> {
        self.start_dir.as_ref()
    }

    #[inline]
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    #[inline]
    pub fn log_file(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Search {
    #[serde(default = "default_max_results")]
    max_results: usize,
    jump_to_first_match: bool,
}

impl Default for Search {
    fn default() -> Self {
        Search {
            max_results: DEFAULT_MAX_RESULTS,
            jump_to_first_match: true,
        }
    }
}

#[derive(Debug)]
pub struct InternalSearch {
    max_results: usize,
    jump_to_first_match: bool,
}

impl From<Search> for InternalSearch {
    fn from(s: Search) -> Self {
        Self {
            max_results: clamp_max_results(s.max_results),
            jump_to_first_match: s.jump_to_first_match,
        }
    }
}

impl InternalSearch {
    /// Results kept per search before the search is stopped.
    #[inline]
    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Re-root the tree on the first match of a search.
    #[inline]
    pub fn jump_to_first_match(&self) -> bool {
        self.jump_to_first_match
    }
}

/// Helper function for default max_results
fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}
