use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::editor::EditorBuffer;
use crate::error::StudioError;
use crate::styler::{Preview, render_pass};
use crate::template::{PROJECT_FIELDS, ProjectInfo, TemplateKind};

/// Rows taken by the toolbar above the panes.
pub const TOOLBAR_ROWS: u16 = 1;
/// Rows taken by the status line below the panes.
pub const STATUS_ROWS: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// What a submitted form does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Import,
    Export,
    Badge,
    ProjectInfo,
    CodeLanguage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
}

impl FormField {
    fn new(key: &'static str, label: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            label,
            value: value.into(),
        }
    }
}

/// A small modal form of single-line text fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub kind: FormKind,
    pub title: &'static str,
    pub fields: Vec<FormField>,
    pub focus: usize,
}

impl Form {
    fn new(kind: FormKind, title: &'static str, fields: Vec<FormField>) -> Self {
        Self {
            kind,
            title,
            fields,
            focus: 0,
        }
    }

    pub fn import() -> Self {
        Self::new(
            FormKind::Import,
            "Import README",
            vec![FormField::new("path", "File path", "")],
        )
    }

    pub fn export(default_path: &str) -> Self {
        Self::new(
            FormKind::Export,
            "Export README",
            vec![FormField::new("path", "File path", default_path)],
        )
    }

    pub fn badge() -> Self {
        Self::new(
            FormKind::Badge,
            "Add Badge",
            vec![
                FormField::new("label", "Label", ""),
                FormField::new("message", "Message", ""),
                FormField::new("color", "Color", "blue"),
            ],
        )
    }

    pub fn project_info(info: &ProjectInfo) -> Self {
        let fields = PROJECT_FIELDS
            .iter()
            .map(|&(key, label)| FormField::new(key, label, info.field(key)))
            .collect();
        Self::new(FormKind::ProjectInfo, "Project Information", fields)
    }

    pub fn code_language() -> Self {
        Self::new(
            FormKind::CodeLanguage,
            "Code Block",
            vec![FormField::new("language", "Language (optional)", "")],
        )
    }

    pub fn value(&self, key: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map_or("", |f| f.value.as_str())
    }

    pub(super) fn focused_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.focus)
    }

    pub(super) fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub(super) fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }
}

/// The popup currently covering the panes, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Help,
    Form(Form),
    /// Yes/no before replacing the document with the basic template.
    ConfirmNew,
    /// Error or info message box; any key dismisses it.
    Modal {
        title: String,
        message: String,
        level: ToastLevel,
    },
}

/// Work requested by `update` that touches the outside world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingEffect {
    Import(PathBuf),
    Export(PathBuf),
    OpenInBrowser,
}

/// The complete application state.
pub struct Model {
    /// The README being edited
    pub editor: EditorBuffer,
    /// Styled preview from the last render pass
    pub preview: Preview,
    /// Set by edits; the event loop re-renders on its next idle tick
    pub preview_stale: bool,
    /// Status line text
    pub status: String,
    pub project_info: ProjectInfo,
    pub overlay: Option<Overlay>,
    pub help_scroll_offset: usize,
    toast: Option<Toast>,
    /// First editor line shown; the preview uses the same offset
    pub editor_scroll_offset: usize,
    pub terminal_size: (u16, u16),
    pub pending_effect: Option<PendingEffect>,
    /// Path of the last import or export, offered as the export default
    pub file_path: Option<PathBuf>,
    pub config_global_path: Option<PathBuf>,
    pub config_local_path: Option<PathBuf>,
    /// Set after a first quit attempt with unsaved changes
    pub quit_confirmed: bool,
    pub should_quit: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("editor", &self.editor)
            .field("status", &self.status)
            .field("overlay", &self.overlay)
            .field("file_path", &self.file_path)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model holding `text`, with the preview already rendered.
    pub fn new(text: &str, project_info: ProjectInfo, terminal_size: (u16, u16)) -> Self {
        let mut model = Self {
            editor: EditorBuffer::from_text(text),
            terminal_size,
            project_info,
            ..Self::default()
        };
        model.refresh_preview();
        model
    }

    /// Run a full render pass over the buffer.
    ///
    /// The text is also run through the export converter; if that fails the
    /// previous preview stays on screen and only the status line changes.
    pub fn refresh_preview(&mut self) {
        let _scope = crate::perf::scope("preview.pass");
        let text = self.editor.text();
        self.preview_stale = false;

        if let Err(err) = crate::export::markdown_body(&text) {
            self.report_error(&err);
            return;
        }

        self.preview = render_pass(&text);
        let chars = text.trim().chars().count();
        self.status = format!("Preview updated - {chars} characters");
        crate::perf::log_event(
            "preview.pass",
            format!(
                "lines={} tags={} chars={chars}",
                self.preview.line_count(),
                self.preview.tags().len()
            ),
        );
    }

    /// Replace the whole document and re-render immediately.
    pub(super) fn replace_document(&mut self, text: &str) {
        self.editor.replace_all(text);
        self.editor_scroll_offset = 0;
        self.refresh_preview();
    }

    pub(super) fn load_template(&mut self, kind: TemplateKind) {
        let text = kind.render(&self.project_info);
        self.replace_document(&text);
    }

    /// Insert a snippet at the caret and re-render immediately.
    pub(super) fn insert_snippet(&mut self, snippet: &str) {
        self.editor.insert_str(snippet);
        self.ensure_cursor_visible();
        self.refresh_preview();
    }

    /// Route an error to its surface: render failures go to the status line,
    /// everything else opens a modal.
    pub fn report_error(&mut self, err: &StudioError) {
        tracing::warn!(error = %err, "operation failed");
        if err.is_render_failure() {
            self.status = format!("Preview error: {err}");
        } else {
            self.overlay = Some(Overlay::Modal {
                title: "Error".to_string(),
                message: err.to_string(),
                level: ToastLevel::Error,
            });
        }
    }

    pub(super) fn show_info_modal(&mut self, title: &str, message: impl Into<String>) {
        self.overlay = Some(Overlay::Modal {
            title: title.to_string(),
            message: message.into(),
            level: ToastLevel::Info,
        });
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    pub const fn help_visible(&self) -> bool {
        matches!(self.overlay, Some(Overlay::Help))
    }

    pub fn active_form(&self) -> Option<&Form> {
        match &self.overlay {
            Some(Overlay::Form(form)) => Some(form),
            _ => None,
        }
    }

    /// Text rows available to each pane (inside the pane borders).
    pub fn pane_rows(&self) -> usize {
        let footer = STATUS_ROWS + u16::from(self.toast.is_some());
        self.terminal_size
            .1
            .saturating_sub(TOOLBAR_ROWS + footer + 2)
            .max(1) as usize
    }

    /// Keep the caret inside the visible editor rows.
    pub(super) fn ensure_cursor_visible(&mut self) {
        let rows = self.pane_rows();
        let line = self.editor.cursor().line;
        if line < self.editor_scroll_offset {
            self.editor_scroll_offset = line;
        } else if line >= self.editor_scroll_offset + rows {
            self.editor_scroll_offset = line + 1 - rows;
        }
    }

    pub(super) fn max_scroll_offset(&self) -> usize {
        self.editor.line_count().saturating_sub(1)
    }
}

impl Default for Model {
    fn default() -> Self {
        Self {
            editor: EditorBuffer::empty(),
            preview: Preview::new(),
            preview_stale: false,
            status: "Ready".to_string(),
            project_info: ProjectInfo::default(),
            overlay: None,
            help_scroll_offset: 0,
            toast: None,
            editor_scroll_offset: 0,
            terminal_size: (80, 24),
            pending_effect: None,
            file_path: None,
            config_global_path: None,
            config_local_path: None,
            quit_confirmed: false,
            should_quit: false,
        }
    }
}
