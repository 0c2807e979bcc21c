use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};
use crate::files;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let filename = model
        .file_path
        .as_deref()
        .map_or_else(|| "untitled".to_string(), files::display_name);
    let dirty_indicator = if model.editor.is_dirty() {
        " [modified]"
    } else {
        ""
    };
    let cursor = model.editor.cursor();

    let left = format!(" {}", model.status);
    let right = format!(
        "{filename}{dirty_indicator}  Ln {}, Col {}  F1:help ",
        cursor.line + 1,
        cursor.col + 1
    );
    let gap = usize::from(area.width)
        .saturating_sub(left.chars().count() + right.chars().count())
        .max(2);
    let status = format!("{left}{}{right}", " ".repeat(gap));

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
