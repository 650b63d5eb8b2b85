//! UI pane drawing module for treeseek.
//!
//! Draws the tree pane (the listing of the current root) and the results pane
//! (matches of the latest search).
//!
//! Used internally by ui::render

use crate::app::AppState;
use crate::core::FileEntry;
use crate::ui::widgets::fit_width;
use crate::utils::shorten_home_path;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

const HIGHLIGHT_SYMBOL: &str = "> ";

/// Styles used for rendering items in a pane
struct PaneStyles {
    item: Style,
    dir: Style,
    symlink: Style,
    selection: Style,
    border: Style,
}

impl Default for PaneStyles {
    fn default() -> Self {
        Self {
            item: Style::default(),
            dir: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            symlink: Style::default().fg(Color::Cyan),
            selection: Style::default().add_modifier(Modifier::REVERSED),
            border: Style::default().fg(Color::DarkGray),
        }
    }
}

impl PaneStyles {
    fn entry_style(&self, entry: &FileEntry, is_selected: bool) -> Style {
        let style = if entry.is_symlink() {
            self.symlink
        } else if entry.is_dir() {
            self.dir
        } else {
            self.item
        };
        if is_selected {
            style.patch(self.selection)
        } else {
            style
        }
    }
}

/// Draws the listing of the tree root with the selection highlighted.
pub(crate) fn draw_tree(frame: &mut Frame, app: &AppState, area: Rect) {
    let styles = PaneStyles::default();
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(styles.border);
    let inner_width = block.inner(area).width as usize;
    let name_width = inner_width.saturating_sub(HIGHLIGHT_SYMBOL.len());

    let entries = app.nav().entries();
    if entries.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled("[Empty]", styles.item))).block(block),
            area,
        );
        return;
    }

    let selected = app.visible_selected();
    let items: Vec<ListItem> = entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let mut name = entry.name_str().into_owned();
            if entry.is_dir() {
                name.push('/');
            }
            let style = styles.entry_style(entry, Some(idx) == selected);
            ListItem::new(Line::from(Span::styled(fit_width(&name, name_width), style)))
        })
        .collect();

    let mut state = ListState::default();
    state.select(selected);

    frame.render_stateful_widget(
        List::new(items)
            .block(block)
            .highlight_style(Style::default())
            .highlight_symbol(HIGHLIGHT_SYMBOL)
            .scroll_padding(2),
        area,
        &mut state,
    );
}

/// Draws the matches of the latest search, newest at the bottom.
pub(crate) fn draw_results(frame: &mut Frame, app: &AppState, area: Rect) {
    let styles = PaneStyles::default();
    let find = app.find();

    let mut title = format!(" \"{}\" {} ", find.query(), find.results().len());
    if find.is_searching() {
        title.push_str("searching… ");
    } else if find.is_truncated() {
        title.push_str("(limit) ");
    } else if let Some((_, stats)) = find.finished() {
        title.push_str(&format!("of {} files ", stats.files_seen));
    }

    let block = Block::default()
        .title(title)
        .borders(Borders::LEFT)
        .border_style(styles.border);
    let inner_width = block.inner(area).width as usize;
    let row_width = inner_width.saturating_sub(HIGHLIGHT_SYMBOL.len());

    if find.results().is_empty() {
        let text = if find.is_searching() {
            "[Searching]"
        } else {
            "[No matches]"
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(text, styles.item))).block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = find
        .results()
        .iter()
        .enumerate()
        .map(|(idx, path)| {
            let style = if idx == find.selected() {
                styles.item.patch(styles.selection)
            } else {
                styles.item
            };
            let shown = shorten_home_path(path);
            ListItem::new(Line::from(Span::styled(fit_width(&shown, row_width), style)))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(find.selected()));

    frame.render_stateful_widget(
        List::new(items)
            .block(block)
            .highlight_style(Style::default())
            .highlight_symbol(HIGHLIGHT_SYMBOL),
        area,
        &mut state,
    );
}
