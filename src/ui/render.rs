use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::app::{Model, STATUS_ROWS, TOOLBAR, TOOLBAR_ROWS};

use super::{overlays, status, style};

const TOOLBAR_SEPARATOR: &str = "│";

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub toolbar: Rect,
    pub editor: Rect,
    pub preview: Rect,
    pub toast: Option<Rect>,
    pub status: Rect,
}

/// Split the terminal into toolbar, the two panes and the footer rows.
pub fn split_areas(area: Rect, toast_active: bool) -> Areas {
    let toast_rows = u16::from(toast_active);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TOOLBAR_ROWS),
            Constraint::Min(0),
            Constraint::Length(toast_rows),
            Constraint::Length(STATUS_ROWS),
        ])
        .split(area);
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    Areas {
        toolbar: rows[0],
        editor: panes[0],
        preview: panes[1],
        toast: toast_active.then_some(rows[2]),
        status: rows[3],
    }
}

fn areas_for(model: &Model) -> Areas {
    let (width, height) = model.terminal_size;
    split_areas(
        Rect::new(0, 0, width, height),
        model.active_toast().is_some(),
    )
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let areas = split_areas(frame.area(), model.active_toast().is_some());

    render_toolbar(frame, areas.toolbar);
    render_editor(model, frame, areas.editor);
    render_preview(model, frame, areas.preview);
    if let Some(toast_area) = areas.toast {
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, areas.status);

    overlays::render_overlay(model, frame, frame.area());
}

/// Width of one toolbar button, e.g. ` ^N New `.
fn toolbar_segment_width(key: &str, label: &str) -> u16 {
    u16::try_from(key.chars().count() + label.chars().count() + 3).unwrap_or(u16::MAX)
}

fn render_toolbar(frame: &mut Frame, area: Rect) {
    let light_bg = style::is_light_background();
    let key_style = Style::default()
        .fg(if light_bg {
            Color::Indexed(25)
        } else {
            Color::Yellow
        })
        .add_modifier(Modifier::BOLD);
    let sep_style = Style::default().fg(Color::Indexed(240));

    let mut spans = Vec::with_capacity(TOOLBAR.len() * 3);
    for (idx, item) in TOOLBAR.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(TOOLBAR_SEPARATOR, sep_style));
        }
        spans.push(Span::styled(format!(" {}", item.key), key_style));
        spans.push(Span::raw(format!(" {} ", item.label)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Index of the toolbar button under a screen column.
pub fn toolbar_item_at(column: u16) -> Option<usize> {
    let mut x: u16 = 0;
    for (idx, item) in TOOLBAR.iter().enumerate() {
        if idx > 0 {
            x = x.saturating_add(1);
        }
        let end = x.saturating_add(toolbar_segment_width(item.key, item.label));
        if column >= x && column < end {
            return Some(idx);
        }
        x = end;
    }
    None
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}

fn pane_block(title: &str) -> Block<'static> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Indexed(240)))
}

/// Inner rect of the editor pane where text (after the gutter) starts.
fn editor_text_area(model: &Model, pane: Rect) -> Rect {
    let inner = pane_block("").inner(pane);
    let gutter = line_number_width(model.editor.line_count()) + 1;
    Rect {
        x: inner.x.saturating_add(gutter),
        width: inner.width.saturating_sub(gutter),
        ..inner
    }
}

fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}

/// Display columns to skip so the caret stays inside the editor's text width.
fn horizontal_offset(model: &Model, text_width: u16) -> usize {
    let cursor = model.editor.cursor();
    let line = model.editor.line_at(cursor.line).unwrap_or_default();
    let caret_col: usize = line.chars().take(cursor.col).map(char_width).sum();
    let width = usize::from(text_width).max(1);
    (caret_col + 1).saturating_sub(width)
}

fn render_editor(model: &Model, frame: &mut Frame, area: Rect) {
    let block = pane_block("Markdown Editor");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let buf = &model.editor;
    let total_lines = buf.line_count();
    let gutter_width = line_number_width(total_lines);
    let text_area = editor_text_area(model, area);
    let skip = horizontal_offset(model, text_area.width);
    let cursor = buf.cursor();
    let show_cursor = model.overlay.is_none();

    let start = model.editor_scroll_offset;
    let end = (start + inner.height as usize).min(total_lines);
    let mut content: Vec<Line> = Vec::with_capacity(end.saturating_sub(start));
    for line_idx in start..end {
        let line_text = buf.line_at(line_idx).unwrap_or_default();
        let line_num = format!("{:>width$} ", line_idx + 1, width = gutter_width as usize);
        let mut spans = vec![Span::styled(line_num, Style::default().fg(Color::DarkGray))];

        let caret = (show_cursor && line_idx == cursor.line).then_some(cursor.col);
        spans.extend(editor_line_spans(&line_text, skip, caret));
        content.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(content), inner);
}

/// Spans for one editor line, scrolled left by `skip` columns, with the
/// caret drawn as an inverted cell.
fn editor_line_spans(line: &str, skip: usize, caret: Option<usize>) -> Vec<Span<'static>> {
    let mut before = String::new();
    let mut at = None;
    let mut after = String::new();
    let mut col = 0;
    for (idx, ch) in line.chars().enumerate() {
        let start = col;
        col += char_width(ch);
        if start < skip {
            continue;
        }
        match caret {
            Some(c) if idx < c => before.push(ch),
            Some(c) if idx == c => at = Some(ch),
            Some(_) => after.push(ch),
            None => before.push(ch),
        }
    }

    let mut spans = Vec::with_capacity(3);
    if !before.is_empty() {
        spans.push(Span::raw(before));
    }
    if caret.is_some() {
        spans.push(Span::styled(
            at.map_or_else(|| " ".to_string(), String::from),
            Style::default().bg(Color::White).fg(Color::Black),
        ));
    }
    if !after.is_empty() {
        spans.push(Span::raw(after));
    }
    spans
}

/// Buffer position (line, char column) under a screen cell in the editor.
pub fn editor_position_at(model: &Model, column: u16, row: u16) -> Option<(usize, usize)> {
    let pane = areas_for(model).editor;
    let text_area = editor_text_area(model, pane);
    if row < text_area.y
        || row >= text_area.y + text_area.height
        || column < pane.x + 1
        || column >= text_area.x + text_area.width
    {
        return None;
    }

    let line = model.editor_scroll_offset + usize::from(row - text_area.y);
    if line >= model.editor.line_count() {
        let last = model.editor.line_count().saturating_sub(1);
        return Some((last, model.editor.line_len(last)));
    }
    if column < text_area.x {
        // Gutter click goes to the start of the line
        return Some((line, 0));
    }

    let target = horizontal_offset(model, text_area.width) + usize::from(column - text_area.x);
    let text = model.editor.line_at(line).unwrap_or_default();
    let mut x = 0;
    for (idx, ch) in text.chars().enumerate() {
        x += char_width(ch);
        if x > target {
            return Some((line, idx));
        }
    }
    Some((line, text.chars().count()))
}

fn render_preview(model: &Model, frame: &mut Frame, area: Rect) {
    let block = pane_block("Live Preview");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let preview = &model.preview;
    let start = model.editor_scroll_offset.min(preview.line_count());
    let end = (start + inner.height as usize).min(preview.line_count());
    let lines: Vec<Line> = preview.lines()[start..end]
        .iter()
        .enumerate()
        .map(|(offset, text)| style::styled_line(text, preview.tags_for_line(start + offset + 1)))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}
