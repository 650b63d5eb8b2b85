//! UI renderer implementation.
//!
//! Contains the top-level `render` entry point used by the terminal loop and the
//! layout helper that splits the screen into header, panes, path field and
//! status line.
//!
//! This module should stay mostly “pure rendering”: it reads state + config and
//! produces widgets, without owning treeseek core logic.

use crate::app::AppState;
use crate::ui::{panes, widgets};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

/// Share of the body width given to the tree pane when results are shown.
const TREE_PERCENT: u16 = 60;

/// Screen areas of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FrameLayout {
    pub(crate) header: Rect,
    pub(crate) tree: Rect,
    pub(crate) results: Option<Rect>,
    pub(crate) path: Rect,
    pub(crate) status: Rect,
}

/// Render function which renders the entire terminal UI for treeseek on each frame.
pub(crate) fn render(frame: &mut Frame, app: &AppState) {
    let show_results = app.find().session().is_some();
    let layout = layout_chunks(frame.area(), show_results);

    widgets::draw_header(frame, app, layout.header);
    panes::draw_tree(frame, app, layout.tree);
    if let Some(area) = layout.results {
        panes::draw_results(frame, app, area);
    }
    widgets::draw_path_line(frame, app, layout.path);
    widgets::draw_status_line(frame, app, layout.status);

    // Dialog goes last so it sits on top of everything else.
    widgets::draw_input_dialog(frame, app);
}

/// Splits `size` into the frame areas. The results pane only takes space once a
/// search has been started.
pub(crate) fn layout_chunks(size: Rect, show_results: bool) -> FrameLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(size);

    let (tree, results) = if show_results {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(TREE_PERCENT),
                Constraint::Percentage(100 - TREE_PERCENT),
            ])
            .split(rows[1]);
        (cols[0], Some(cols[1]))
    } else {
        (rows[1], None)
    };

    FrameLayout {
        header: rows[0],
        tree,
        results,
        path: rows[2],
        status: rows[3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::{SearchCoordinator, SilentObserver, SystemOpener};

    use ratatui::{Terminal, backend::TestBackend};
    use std::fs::File;
    use std::sync::Arc;
    use tempfile::tempdir;

    #[test]
    fn layout_without_results() {
        let layout = layout_chunks(Rect::new(0, 0, 80, 24), false);
        assert!(layout.results.is_none());
        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.tree.height, 21);
        assert_eq!(layout.tree.width, 80);
        assert_eq!(layout.status.y, 23);
    }

    #[test]
    fn layout_with_results() {
        let layout = layout_chunks(Rect::new(0, 0, 100, 10), true);
        let Some(results) = layout.results else {
            panic!("results pane missing");
        };
        assert_eq!(layout.tree.width + results.width, 100);
        assert_eq!(layout.tree.width, 60);
        assert_eq!(results.x, 60);
    }

    #[test]
    fn renders_tree_path_and_status() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("visible_file.txt"))?;
        let config = Config::default();
        let app = AppState::with_parts(
            &config,
            dir.path().to_path_buf(),
            SearchCoordinator::new(Arc::new(SilentObserver)),
            Box::new(SystemOpener),
        );

        let mut terminal = Terminal::new(TestBackend::new(60, 10))?;
        terminal.draw(|f| render(f, &app))?;

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("visible_file.txt"));
        assert!(text.contains("Path: "));
        assert!(text.contains("Ready"));
        assert!(text.contains("1/1"));
        Ok(())
    }
}
