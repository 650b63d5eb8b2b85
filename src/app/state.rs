//! Application State and main controller module for treeseek.
//!
//! This module defines the overall [AppState] struct, which holds all major application
//! information and passes it to relevant UI/Terminal functions
//! - Configuration (loaded from config files) and the keymap
//! - Navigation state of the tree pane
//! - Input prompt state
//! - The search coordinator and the results delivered by it
//! - The opener used for "open with default application"
//!
//! The terminal loop calls [AppState::tick] once per frame to pull search events
//! and [AppState::handle_keypress] for every key.

use crate::app::actions::ActionContext;
use crate::app::keymap::{Action, Keymap};
use crate::app::{FindState, NavState};
use crate::config::Config;
use crate::core::{
    LogObserver, Opener, ScanOutcome, ScanStats, SearchCoordinator, SearchEvent, SystemOpener,
};
use crate::utils::shorten_home_path;

use crossterm::event::KeyEvent;

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Upper bound of search events handled per tick, so a fast scan cannot stall redraws.
const EVENTS_PER_TICK: usize = 1024;

/// Enumeration for each individual keypress result processed.
///
/// Is used to process action logic correctly.
pub(crate) enum KeypressResult {
    Continue,
    Consumed,
    Quit,
    /// Another program was launched, the terminal may need a full redraw.
    Opened,
}

/// Main struct which holds the central Application state of treeseek
///
/// Functions are provided for the core event loop, input handling, navigation
/// and the search lifecycle.
pub(crate) struct AppState<'a> {
    pub(super) config: &'a Config,
    pub(super) keymap: Keymap,

    pub(super) nav: NavState,
    pub(super) actions: ActionContext,
    pub(super) find: FindState,

    pub(super) search: SearchCoordinator,
    pub(super) opener: Box<dyn Opener>,
}

impl<'a> AppState<'a> {
    /// Opens at the configured start directory, or the current directory.
    pub(crate) fn new(config: &'a Config) -> std::io::Result<Self> {
        let start = match config.general().start_dir() {
            Some(dir) if dir.is_dir() => dir.clone(),
            Some(dir) => {
                log::warn!("start_dir {} is not a directory", dir.display());
                std::env::current_dir()?
            }
            None => std::env::current_dir()?,
        };
        Self::from_dir(config, &start)
    }

    pub(crate) fn from_dir(config: &'a Config, initial_path: &Path) -> std::io::Result<Self> {
        let root = if initial_path.is_dir() {
            std::path::absolute(initial_path)?
        } else {
            std::env::current_dir()?
        };

        Ok(Self::with_parts(
            config,
            root,
            SearchCoordinator::new(Arc::new(LogObserver)),
            Box::new(SystemOpener),
        ))
    }

    /// Builds the state from explicit collaborators.
    pub(crate) fn with_parts(
        config: &'a Config,
        root: PathBuf,
        search: SearchCoordinator,
        opener: Box<dyn Opener>,
    ) -> Self {
        Self {
            config,
            keymap: Keymap::from_config(config),
            nav: NavState::new(root, config.general().list_options()),
            actions: ActionContext::default(),
            find: FindState::default(),
            search,
            opener,
        }
    }

    // Getters/ accessors

    #[inline]
    pub(crate) fn nav(&self) -> &NavState {
        &self.nav
    }

    #[inline]
    pub(crate) fn actions(&self) -> &ActionContext {
        &self.actions
    }

    #[inline]
    pub(crate) fn find(&self) -> &FindState {
        &self.find
    }

    #[inline]
    pub(crate) fn is_searching(&self) -> bool {
        self.search.is_searching()
    }

    // Entry functions

    pub(crate) fn visible_selected(&self) -> Option<usize> {
        if self.nav.entries().is_empty() {
            None
        } else {
            Some(self.nav.selected_idx())
        }
    }

    /// Pulls the pending search events into the app state.
    ///
    /// Is used by the main event loop once per frame.
    /// Returns `true` when anything changed and the UI should be redrawn.
    pub(crate) fn tick(&mut self) -> bool {
        let mut changed = false;
        for _ in 0..EVENTS_PER_TICK {
            let Some(event) = self.search.try_next_event() else {
                break;
            };
            self.handle_search_event(event);
            changed = true;
        }
        changed
    }

    /// Central key handler
    ///
    /// Prompts get the key first, everything else goes through the keymap.
    pub(crate) fn handle_keypress(&mut self, key: KeyEvent) -> KeypressResult {
        if self.actions.is_input() {
            return self.handle_input_mode(key);
        }

        match self.keymap.lookup(key) {
            Some(Action::Nav(action)) => self.handle_nav_action(action),
            Some(Action::Search(action)) => self.handle_search_action(action),
            Some(Action::System(action)) => self.handle_sys_action(action),
            None => KeypressResult::Continue,
        }
    }

    // Search lifecycle

    /// Starts a search for `pattern` below the current tree root.
    ///
    /// Replaces the previous search and its results. An invalid request leaves
    /// everything as it was and is reported on the status line.
    pub(crate) fn start_search(&mut self, pattern: String) -> bool {
        let root = self.nav.root().to_path_buf();
        match self.search.start_search(&root, &pattern) {
            Ok(session) => {
                self.nav.set_status(format!(
                    "Searching for \"{}\" in {}",
                    pattern,
                    shorten_home_path(&root)
                ));
                self.find.begin(pattern, session);
                true
            }
            Err(e) => {
                log::warn!("search for {:?} in {} rejected: {}", pattern, root.display(), e);
                self.nav.set_status(format!("Search not started: {}", e));
                false
            }
        }
    }

    pub(crate) fn cancel_search(&mut self) {
        if self.search.is_searching() {
            self.search.cancel_active();
            self.nav.set_status("Search cancelled.");
        } else {
            self.nav.set_status("No search is running.");
        }
    }

    fn handle_search_event(&mut self, event: SearchEvent) {
        if self.find.session() != Some(event.session()) {
            return;
        }

        match event {
            SearchEvent::Match { path, .. } => self.handle_match(path),
            SearchEvent::Complete { outcome, stats, .. } => self.handle_complete(outcome, stats),
        }
    }

    fn handle_match(&mut self, path: PathBuf) {
        let limit = self.config.search().max_results();
        if self.find.results().len() >= limit {
            return;
        }

        if self.find.push(path.clone()) && self.config.search().jump_to_first_match() {
            self.nav.reveal(&path);
        }

        if self.find.results().len() == limit {
            log::info!("search stopped at the result limit of {}", limit);
            self.find.mark_truncated();
            self.search.cancel_active();
        }
    }

    fn handle_complete(&mut self, outcome: ScanOutcome, stats: ScanStats) {
        self.find.finish(outcome, stats);

        let count = self.find.results().len();
        let status = if self.find.is_truncated() {
            format!("Search stopped after {} results.", count)
        } else if outcome == ScanOutcome::Cancelled {
            format!("Search cancelled after {} matches.", count)
        } else if count == 0 {
            format!("No files matching \"{}\".", self.find.query())
        } else {
            format!(
                "Search finished: {} matches for \"{}\".",
                count,
                self.find.query()
            )
        };
        self.nav.set_status(status);
    }
}
