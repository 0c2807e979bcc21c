use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::model::Overlay;
use crate::app::{App, Message, Model};
use crate::editor::Direction;
use crate::template::TemplateKind;

use super::event_loop::ResizeDebouncer;

/// Lines moved per mouse wheel notch.
const WHEEL_LINES: usize = 3;

/// One toolbar button: its shortcut, its label, and what it does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarItem {
    pub key: &'static str,
    pub label: &'static str,
    pub message: Message,
}

const fn item(key: &'static str, label: &'static str, message: Message) -> ToolbarItem {
    ToolbarItem {
        key,
        label,
        message,
    }
}

/// Toolbar buttons, left to right.
pub const TOOLBAR: [ToolbarItem; 13] = [
    item("^N", "New", Message::NewDocument),
    item("^O", "Import", Message::OpenImport),
    item("^S", "Export", Message::OpenExport),
    item("F2", "Basic", Message::LoadTemplate(TemplateKind::Basic)),
    item("F3", "Advanced", Message::LoadTemplate(TemplateKind::Advanced)),
    item("F4", "Info", Message::OpenProjectInfo),
    item("F6", "Badge", Message::OpenBadge),
    item("F7", "Table", Message::InsertTable),
    item("F8", "Code", Message::OpenCodeBlock),
    item("F5", "Refresh", Message::Refresh),
    item("F9", "Browser", Message::OpenInBrowser),
    item("F1", "Help", Message::ToggleHelp),
    item("^Q", "Quit", Message::Quit),
];

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(*key, model),
            Event::Mouse(mouse) => handle_mouse(*mouse, model),
            Event::Paste(text) if model.overlay.is_none() => Some(Message::Paste(text.clone())),
            Event::Resize(w, h) => {
                crate::perf::log_event("event.resize.queue", format!("width={w} height={h}"));
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }
}

pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match &model.overlay {
        Some(Overlay::Help) => {
            return match key.code {
                KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('q' | '?') => {
                    Some(Message::ToggleHelp)
                }
                KeyCode::Char('j') | KeyCode::Down => Some(Message::HelpScrollDown),
                KeyCode::Char('k') | KeyCode::Up => Some(Message::HelpScrollUp),
                _ => None,
            };
        }
        Some(Overlay::Modal { .. }) => return Some(Message::Dismiss),
        Some(Overlay::ConfirmNew) => {
            return match key.code {
                KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(Message::Confirm),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Message::Dismiss),
                _ => None,
            };
        }
        Some(Overlay::Form(_)) => {
            return match key.code {
                KeyCode::Enter => Some(Message::Confirm),
                KeyCode::Esc => Some(Message::Dismiss),
                KeyCode::Tab | KeyCode::Down => Some(Message::FormNextField),
                KeyCode::BackTab | KeyCode::Up => Some(Message::FormPrevField),
                KeyCode::Backspace => Some(Message::FormBackspace),
                KeyCode::Char(c) if !ctrl => Some(Message::FormInput(c)),
                _ => None,
            };
        }
        None => {}
    }

    if ctrl {
        return match key.code {
            KeyCode::Char('q' | 'c') => Some(Message::Quit),
            KeyCode::Char('n') => Some(Message::NewDocument),
            KeyCode::Char('o') => Some(Message::OpenImport),
            KeyCode::Char('s') => Some(Message::OpenExport),
            KeyCode::Char('r') => Some(Message::Refresh),
            KeyCode::Char('p') => Some(Message::OpenInBrowser),
            KeyCode::Left => Some(Message::MoveWordLeft),
            KeyCode::Right => Some(Message::MoveWordRight),
            KeyCode::Home => Some(Message::MoveToStart),
            KeyCode::End => Some(Message::MoveToEnd),
            _ => None,
        };
    }

    match key.code {
        KeyCode::F(1) => Some(Message::ToggleHelp),
        KeyCode::F(2) => Some(Message::LoadTemplate(TemplateKind::Basic)),
        KeyCode::F(3) => Some(Message::LoadTemplate(TemplateKind::Advanced)),
        KeyCode::F(4) => Some(Message::OpenProjectInfo),
        KeyCode::F(5) => Some(Message::Refresh),
        KeyCode::F(6) => Some(Message::OpenBadge),
        KeyCode::F(7) => Some(Message::InsertTable),
        KeyCode::F(8) => Some(Message::OpenCodeBlock),
        KeyCode::F(9) => Some(Message::OpenInBrowser),

        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => {
            Some(Message::InsertChar(c))
        }
        KeyCode::Enter => Some(Message::SplitLine),
        KeyCode::Tab => Some(Message::InsertTab),
        KeyCode::Backspace => Some(Message::DeleteBack),
        KeyCode::Delete => Some(Message::DeleteForward),

        KeyCode::Left => Some(Message::MoveCursor(Direction::Left)),
        KeyCode::Right => Some(Message::MoveCursor(Direction::Right)),
        KeyCode::Up => Some(Message::MoveCursor(Direction::Up)),
        KeyCode::Down => Some(Message::MoveCursor(Direction::Down)),
        KeyCode::Home => Some(Message::MoveHome),
        KeyCode::End => Some(Message::MoveEnd),
        KeyCode::PageUp => Some(Message::PageUp),
        KeyCode::PageDown => Some(Message::PageDown),
        _ => None,
    }
}

pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
    match &model.overlay {
        Some(Overlay::Modal { .. }) => {
            return matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left))
                .then_some(Message::Dismiss);
        }
        Some(_) => return None,
        None => {}
    }

    match mouse.kind {
        MouseEventKind::ScrollUp => Some(Message::ScrollUp(WHEEL_LINES)),
        MouseEventKind::ScrollDown => Some(Message::ScrollDown(WHEEL_LINES)),
        MouseEventKind::Down(MouseButton::Left) => {
            if mouse.row < super::TOOLBAR_ROWS {
                let idx = crate::ui::toolbar_item_at(mouse.column)?;
                return Some(TOOLBAR[idx].message.clone());
            }
            let (line, col) = crate::ui::editor_position_at(model, mouse.column, mouse.row)?;
            Some(Message::MoveTo(line, col))
        }
        _ => None,
    }
}
