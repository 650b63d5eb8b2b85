//! Terminal UI of treeseek.
//!
//! - [render]: frame layout and the top-level [render::render] entry point
//! - [panes]: the tree pane and the search results pane
//! - [widgets]: header, path field, status line and the input dialog

pub(crate) mod panes;
pub(crate) mod render;
pub(crate) mod widgets;

pub(crate) use render::render;
