//! Single line widgets and the input dialog.
//!
//! Also holds the width helpers shared by the panes. Widths are measured with
//! `unicode-width`, so wide characters take two cells.

use crate::app::AppState;
use crate::app::actions::ActionMode;
use crate::utils::shorten_home_path;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ACCENT: Color = Color::Cyan;

/// The tree root on the left, the search indicator on the right.
pub(crate) fn draw_header(frame: &mut Frame, app: &AppState, area: Rect) {
    let path_style = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);
    let root = shorten_home_path(app.nav().root());

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            fit_width(&root, area.width as usize),
            path_style,
        ))),
        area,
    );

    if app.is_searching() {
        let query = app.find().query();
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!(" searching \"{}\" ", query),
                Style::default().fg(Color::Black).bg(Color::Yellow),
            )))
            .alignment(Alignment::Right),
            area,
        );
    }
}

/// The editable path field.
pub(crate) fn draw_path_line(frame: &mut Frame, app: &AppState, area: Rect) {
    let label = "Path: ";
    let rest = (area.width as usize).saturating_sub(label.len());
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(label, Style::default().fg(ACCENT)),
            Span::raw(fit_width(app.nav().path_field(), rest)),
        ])),
        area,
    );
}

/// Status message on the left, selection counter on the right.
pub(crate) fn draw_status_line(frame: &mut Frame, app: &AppState, area: Rect) {
    let total = app.nav().entries().len();
    let counter = match app.visible_selected() {
        Some(idx) => format!(" {}/{}", idx + 1, total),
        None => " 0/0".to_string(),
    };
    let status_width = (area.width as usize).saturating_sub(counter.width());
    let style = Style::default().fg(Color::Gray);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(fit_width(app.nav().status(), status_width), style),
            Span::styled(counter, style),
        ])),
        area,
    );
}

/// Draws the open prompt, if any, as a centered one line dialog.
pub(crate) fn draw_input_dialog(frame: &mut Frame, app: &AppState) {
    let ActionMode::Input { prompt, .. } = app.actions().mode() else {
        return;
    };

    let area = dialog_area(frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(Span::styled(format!(" {} ", prompt.trim()), Style::default().fg(ACCENT)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));
    let inner = block.inner(area);

    let (visible, cursor_offset) = input_field_view(
        app.actions().input_buffer(),
        app.actions().input_cursor_pos(),
        inner.width as usize,
    );

    frame.render_widget(Paragraph::new(visible).block(block), area);
    frame.set_cursor_position((inner.x + cursor_offset as u16, inner.y));
}

/// A 3 row box, 60% wide, centered in `area`.
fn dialog_area(area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Fill(1),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical[1])[1]
}

/// Returns the part of `input_text` to show and the cursor column within it.
///
/// When the text is wider than `visible_width`, characters are dropped from the
/// front until the cursor fits.
fn input_field_view(input_text: &str, cursor_pos: usize, visible_width: usize) -> (&str, usize) {
    let cursor_pos = cursor_pos.min(input_text.len());
    let mut before = input_text[..cursor_pos].width();
    if input_text.width() <= visible_width && before < visible_width.max(1) {
        return (input_text, before);
    }

    let mut start = 0;
    for (idx, ch) in input_text[..cursor_pos].char_indices() {
        if before < visible_width {
            break;
        }
        before -= ch.width().unwrap_or(0);
        start = idx + ch.len_utf8();
    }
    (&input_text[start..], before)
}

/// Fits `line` into exactly `width` terminal cells.
///
/// Control characters are dropped and tabs become a space. Longer text is cut
/// and ends in "…", shorter text is padded with spaces.
pub(crate) fn fit_width(line: &str, width: usize) -> String {
    let chars: Vec<char> = line
        .chars()
        .filter_map(|c| match c {
            '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect();
    let total: usize = chars.iter().map(|c| c.width().unwrap_or(0)).sum();

    let mut out = String::with_capacity(width);
    let mut current_w = 0;

    if total <= width {
        out.extend(chars.iter());
        current_w = total;
    } else if width > 0 {
        let budget = width - 1;
        for ch in chars {
            let w = ch.width().unwrap_or(0);
            if current_w + w > budget {
                break;
            }
            out.push(ch);
            current_w += w;
        }
        out.push('…');
        current_w += 1;
    }

    // If the string is shorter than the pane, fill it with spaces.
    if current_w < width {
        out.push_str(&" ".repeat(width - current_w));
    }
    out
}
