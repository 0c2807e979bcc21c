use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::app::{Form, Model, Overlay, ToastLevel};

/// Draw whichever popup the model has open.
pub fn render_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    match &model.overlay {
        Some(Overlay::Help) => render_help_overlay(model, frame, area),
        Some(Overlay::Form(form)) => render_form_overlay(form, frame, area),
        Some(Overlay::ConfirmNew) => render_confirm_overlay(frame, area),
        Some(Overlay::Modal {
            title,
            message,
            level,
        }) => render_modal_overlay(title, message, *level, frame, area),
        None => {}
    }
}

fn popup_block(title: &str, border: Color) -> Block<'static> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(Color::Black).fg(Color::White))
}

fn dim_style() -> Style {
    Style::default().fg(Color::Indexed(245))
}

/// Rect inside a popup's border and padding.
fn popup_inner(popup: Rect) -> Rect {
    Rect::new(
        popup.x + 2,
        popup.y + 1,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(2),
    )
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(6).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut all_lines: Vec<Line> = Vec::new();

    all_lines.push(Line::styled("Document", section_style));
    all_lines.push(Line::raw("  Ctrl-n              New README (basic template)"));
    all_lines.push(Line::raw("  Ctrl-o              Import a file"));
    all_lines.push(Line::raw("  Ctrl-s              Export to a file"));
    all_lines.push(Line::raw("  F2 / F3             Basic / advanced template"));
    all_lines.push(Line::raw("  F4                  Project information"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Insert", section_style));
    all_lines.push(Line::raw("  F6                  Badge"));
    all_lines.push(Line::raw("  F7                  Table"));
    all_lines.push(Line::raw("  F8                  Code block"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Preview", section_style));
    all_lines.push(Line::raw("  F5 / Ctrl-r         Refresh preview"));
    all_lines.push(Line::raw("  F9 / Ctrl-p         Open in browser"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Editor", section_style));
    all_lines.push(Line::raw("  Arrows, Home/End    Move caret"));
    all_lines.push(Line::raw("  Ctrl+Left/Right     Word movement"));
    all_lines.push(Line::raw("  Ctrl+Home/End       Buffer start / end"));
    all_lines.push(Line::raw("  PageUp/PageDown     Page"));
    all_lines.push(Line::raw("  Tab                 Insert four spaces"));
    all_lines.push(Line::raw("  Mouse click / wheel Place caret / scroll"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Dialogs", section_style));
    all_lines.push(Line::raw("  Tab / Shift-Tab     Next / previous field"));
    all_lines.push(Line::raw("  Enter               Submit"));
    all_lines.push(Line::raw("  Esc                 Cancel"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Other", section_style));
    all_lines.push(Line::raw("  F1                  Toggle help"));
    all_lines.push(Line::raw("  Ctrl-q / Ctrl-c     Quit (twice with unsaved changes)"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Config", section_style));
    all_lines.push(Line::raw(format!("  Global: {global_cfg}")));
    all_lines.push(Line::raw(format!("  Local override: {local_cfg}")));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    // Inner area: border(1) + padding(1) on each side = 4
    let inner = Rect::new(
        popup.x + 2,
        popup.y + 2,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(4),
    );

    // Reserve 1 row at bottom for footer hint
    let content_height_u16 = inner.height.saturating_sub(1);
    let content_height = content_height_u16 as usize;
    let max_scroll = all_lines.len().saturating_sub(content_height);
    let scroll = model.help_scroll_offset.min(max_scroll);

    let end = (scroll + content_height).min(all_lines.len());
    let visible: Vec<Line> = all_lines[scroll..end].to_vec();

    let content_area = Rect::new(inner.x, inner.y, inner.width, content_height_u16);
    frame.render_widget(Paragraph::new(visible), content_area);

    let footer_area = Rect::new(inner.x, inner.y + content_height_u16, inner.width, 1);
    let footer = Line::styled("j/k scroll \u{2502} Esc closes", dim_style());
    frame.render_widget(Paragraph::new(footer), footer_area);
}

fn render_form_overlay(form: &Form, frame: &mut Frame, area: Rect) {
    // label row + value row per field, a blank line, the footer, and borders
    let rows = u16::try_from(form.fields.len() * 2).unwrap_or(u16::MAX);
    let popup = centered_popup_rect(area.width.saturating_sub(8).min(64), rows + 4, area);

    let label_style = Style::default().fg(Color::Indexed(250));
    let focused_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Indexed(252));
    let value_style = Style::default().fg(Color::White).bg(Color::Indexed(237));

    let mut lines = Vec::with_capacity(form.fields.len() * 2 + 2);
    for (idx, field) in form.fields.iter().enumerate() {
        lines.push(Line::styled(format!("{}:", field.label), label_style));
        let value = if idx == form.focus {
            Line::from(vec![
                Span::styled(field.value.clone(), focused_style),
                Span::styled("\u{258f}", focused_style),
            ])
        } else {
            Line::styled(field.value.clone(), value_style)
        };
        lines.push(value);
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "Enter submit \u{2502} Tab next field \u{2502} Esc cancel",
        dim_style(),
    ));

    frame.render_widget(Clear, popup);
    frame.render_widget(popup_block(form.title, Color::Cyan), popup);
    frame.render_widget(Paragraph::new(lines), popup_inner(popup));
}

fn render_confirm_overlay(frame: &mut Frame, area: Rect) {
    let popup = centered_popup_rect(area.width.saturating_sub(8).min(64), 6, area);
    let lines = vec![
        Line::raw("Create a new README? This will clear the current content."),
        Line::raw(""),
        Line::styled("y yes \u{2502} n no", dim_style()),
    ];
    frame.render_widget(Clear, popup);
    frame.render_widget(popup_block("New README", Color::Yellow), popup);
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }),
        popup_inner(popup),
    );
}

fn render_modal_overlay(
    title: &str,
    message: &str,
    level: ToastLevel,
    frame: &mut Frame,
    area: Rect,
) {
    let border = match level {
        ToastLevel::Info => Color::Green,
        ToastLevel::Warning => Color::Yellow,
        ToastLevel::Error => Color::Red,
    };
    let width = area.width.saturating_sub(8).min(72);
    let text_width = usize::from(width.saturating_sub(4)).max(1);
    let message_rows: usize = message
        .lines()
        .map(|line| line.chars().count().div_ceil(text_width).max(1))
        .sum();
    let height = u16::try_from(message_rows + 4).unwrap_or(u16::MAX);
    let popup = centered_popup_rect(width, height, area);

    let mut lines: Vec<Line> = message.lines().map(|l| Line::raw(l.to_string())).collect();
    lines.push(Line::raw(""));
    lines.push(Line::styled("Press any key to close", dim_style()));

    frame.render_widget(Clear, popup);
    frame.render_widget(popup_block(title, border), popup);
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }),
        popup_inner(popup),
    );
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
