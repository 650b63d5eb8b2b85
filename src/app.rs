//! Application state and logic for treeseek.
//!
//! Contains the main [AppState] and the state models it is made of:
//! - [nav]: tree root, listing, selection, path field and status line
//! - [find_state]: results of the latest search
//! - [actions]: the input prompt
//! - [keymap]: key bindings
//! - [handlers]: key handlers
//!
//! The background search itself lives in [crate::core::coordinator].

pub(crate) mod actions;
pub(crate) mod find_state;
pub(crate) mod handlers;
pub(crate) mod keymap;
pub(crate) mod nav;
pub(crate) mod state;

pub(crate) use find_state::FindState;
pub(crate) use nav::NavState;
pub(crate) use state::{AppState, KeypressResult};
