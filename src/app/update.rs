use std::path::PathBuf;

use crate::app::Model;
use crate::app::model::{Form, FormKind, Overlay, PendingEffect, ToastLevel};
use crate::editor::Direction;
use crate::template::{self, TemplateKind};

/// Spaces inserted by the Tab key.
const TAB: &str = "    ";

/// All possible events and actions in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editor
    InsertChar(char),
    InsertTab,
    /// Bracketed paste, inserted at the caret as one edit
    Paste(String),
    DeleteBack,
    DeleteForward,
    SplitLine,
    MoveCursor(Direction),
    MoveHome,
    MoveEnd,
    MoveWordLeft,
    MoveWordRight,
    MoveToStart,
    MoveToEnd,
    PageUp,
    PageDown,
    /// Put the caret at a document position (mouse click)
    MoveTo(usize, usize),
    ScrollUp(usize),
    ScrollDown(usize),

    // Toolbar
    /// Ask before replacing the document with the basic template
    NewDocument,
    LoadTemplate(TemplateKind),
    OpenImport,
    OpenExport,
    OpenProjectInfo,
    OpenBadge,
    InsertTable,
    OpenCodeBlock,
    Refresh,
    OpenInBrowser,

    // Overlays
    ToggleHelp,
    HelpScrollUp,
    HelpScrollDown,
    FormInput(char),
    FormBackspace,
    FormNextField,
    FormPrevField,
    /// Submit the form or accept the confirmation
    Confirm,
    /// Cancel the form or confirmation, or dismiss a modal
    Dismiss,

    // Window
    Resize(u16, u16),

    Quit,
}

/// Pure state transition. I/O requested here is left in
/// [`Model::pending_effect`] for the event loop to run.
pub fn update(mut model: Model, msg: Message) -> Model {
    if msg != Message::Quit {
        model.quit_confirmed = false;
    }

    match msg {
        Message::InsertChar(ch) => edit(&mut model, |buf| buf.insert_char(ch)),
        Message::InsertTab => edit(&mut model, |buf| buf.insert_str(TAB)),
        Message::Paste(ref text) => edit(&mut model, |buf| buf.insert_str(text)),
        Message::SplitLine => edit(&mut model, |buf| buf.split_line()),
        Message::DeleteBack => edit(&mut model, |buf| {
            buf.delete_back();
        }),
        Message::DeleteForward => edit(&mut model, |buf| {
            buf.delete_forward();
        }),
        Message::MoveCursor(dir) => navigate(&mut model, |buf| buf.move_cursor(dir)),
        Message::MoveHome => navigate(&mut model, |buf| buf.move_home()),
        Message::MoveEnd => navigate(&mut model, |buf| buf.move_end()),
        Message::MoveWordLeft => navigate(&mut model, |buf| buf.move_word_left()),
        Message::MoveWordRight => navigate(&mut model, |buf| buf.move_word_right()),
        Message::MoveToStart => navigate(&mut model, |buf| buf.move_to_start()),
        Message::MoveToEnd => navigate(&mut model, |buf| buf.move_to_end()),
        Message::MoveTo(line, col) => navigate(&mut model, |buf| buf.move_to(line, col)),
        Message::PageUp | Message::PageDown => {
            let rows = isize::try_from(model.pane_rows()).unwrap_or(isize::MAX);
            let delta = if msg == Message::PageUp { -rows } else { rows };
            model.editor.move_lines(delta);
            let max = model.max_scroll_offset();
            model.editor_scroll_offset = model
                .editor_scroll_offset
                .saturating_add_signed(delta)
                .min(max);
            model.ensure_cursor_visible();
        }
        Message::ScrollUp(n) => {
            model.editor_scroll_offset = model.editor_scroll_offset.saturating_sub(n);
        }
        Message::ScrollDown(n) => {
            let max = model.max_scroll_offset();
            model.editor_scroll_offset = (model.editor_scroll_offset + n).min(max);
        }

        Message::NewDocument => model.overlay = Some(Overlay::ConfirmNew),
        Message::LoadTemplate(kind) => {
            model.load_template(kind);
            model.show_toast(ToastLevel::Info, format!("Loaded {} template", kind.label()));
        }
        Message::OpenImport => model.overlay = Some(Overlay::Form(Form::import())),
        Message::OpenExport => {
            let default = model
                .file_path
                .as_ref()
                .map_or_else(|| "README.md".to_string(), |p| p.display().to_string());
            model.overlay = Some(Overlay::Form(Form::export(&default)));
        }
        Message::OpenProjectInfo => {
            model.overlay = Some(Overlay::Form(Form::project_info(&model.project_info)));
        }
        Message::OpenBadge => model.overlay = Some(Overlay::Form(Form::badge())),
        Message::OpenCodeBlock => model.overlay = Some(Overlay::Form(Form::code_language())),
        Message::InsertTable => model.insert_snippet(template::table_snippet()),
        Message::Refresh => model.refresh_preview(),
        Message::OpenInBrowser => model.pending_effect = Some(PendingEffect::OpenInBrowser),

        Message::ToggleHelp => {
            if model.help_visible() {
                model.overlay = None;
            } else {
                model.overlay = Some(Overlay::Help);
                model.help_scroll_offset = 0;
            }
        }
        Message::HelpScrollUp => {
            model.help_scroll_offset = model.help_scroll_offset.saturating_sub(1);
        }
        Message::HelpScrollDown => model.help_scroll_offset += 1,
        Message::FormInput(ch) => {
            if let Some(Overlay::Form(form)) = &mut model.overlay
                && let Some(field) = form.focused_mut()
            {
                field.value.push(ch);
            }
        }
        Message::FormBackspace => {
            if let Some(Overlay::Form(form)) = &mut model.overlay
                && let Some(field) = form.focused_mut()
            {
                field.value.pop();
            }
        }
        Message::FormNextField => {
            if let Some(Overlay::Form(form)) = &mut model.overlay {
                form.focus_next();
            }
        }
        Message::FormPrevField => {
            if let Some(Overlay::Form(form)) = &mut model.overlay {
                form.focus_prev();
            }
        }
        Message::Confirm => confirm(&mut model),
        Message::Dismiss => model.overlay = None,

        Message::Resize(width, height) => {
            model.terminal_size = (width, height);
            model.ensure_cursor_visible();
        }

        Message::Quit => {
            if model.editor.is_dirty() && !model.quit_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press Ctrl+Q again to quit, or Ctrl+S to export",
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }
    }
    model
}

/// Apply a buffer edit and mark the preview stale.
fn edit(model: &mut Model, f: impl FnOnce(&mut crate::editor::EditorBuffer)) {
    f(&mut model.editor);
    model.preview_stale = true;
    model.ensure_cursor_visible();
}

fn navigate(model: &mut Model, f: impl FnOnce(&mut crate::editor::EditorBuffer)) {
    f(&mut model.editor);
    model.ensure_cursor_visible();
}

fn confirm(model: &mut Model) {
    match model.overlay.take() {
        Some(Overlay::ConfirmNew) => {
            model.load_template(TemplateKind::Basic);
            model.file_path = None;
            model.status = "New README created".to_string();
        }
        Some(Overlay::Form(form)) => submit_form(model, &form),
        Some(Overlay::Help | Overlay::Modal { .. }) | None => {}
    }
}

fn submit_form(model: &mut Model, form: &Form) {
    match form.kind {
        FormKind::Import | FormKind::Export => {
            let path = form.value("path").trim();
            if path.is_empty() {
                // Same as cancelling the file dialog
                return;
            }
            let path = PathBuf::from(path);
            model.pending_effect = Some(if form.kind == FormKind::Import {
                PendingEffect::Import(path)
            } else {
                PendingEffect::Export(path)
            });
        }
        FormKind::Badge => {
            let badge = template::badge(
                form.value("label"),
                form.value("message"),
                form.value("color"),
            );
            model.insert_snippet(&badge);
        }
        FormKind::CodeLanguage => {
            model.insert_snippet(&template::code_block_snippet(form.value("language")));
        }
        FormKind::ProjectInfo => {
            for field in &form.fields {
                model
                    .project_info
                    .set_field(field.key, field.value.trim().to_string());
            }
            model.status = "Project info updated".to_string();
        }
    }
}
