use std::path::Path;

use crate::app::model::PendingEffect;
use crate::app::{App, Model};
use crate::{export, files};

impl App {
    /// Run whatever I/O the last `update` asked for.
    pub(super) fn handle_message_side_effects(model: &mut Model) {
        let Some(effect) = model.pending_effect.take() else {
            return;
        };
        crate::perf::log_event("effect", format!("{effect:?}"));
        match effect {
            PendingEffect::Import(path) => import(model, &path),
            PendingEffect::Export(path) => export_to(model, &path),
            PendingEffect::OpenInBrowser => open_in_browser(model),
        }
    }
}

fn import(model: &mut Model, path: &Path) {
    match files::import_text(path) {
        Ok(text) => {
            model.replace_document(&text);
            model.file_path = Some(path.to_path_buf());
            model.status = format!("Imported: {}", files::display_name(path));
            tracing::info!(path = %path.display(), "imported README");
        }
        Err(err) => model.report_error(&err),
    }
}

fn export_to(model: &mut Model, path: &Path) {
    match files::export_text(path, &model.editor.text()) {
        Ok(written) => {
            model.editor.mark_clean();
            model.status = format!("Exported: {}", files::display_name(&written));
            model.show_info_modal(
                "Success",
                format!("README exported successfully to:\n{}", written.display()),
            );
            tracing::info!(path = %written.display(), "exported README");
            model.file_path = Some(written);
        }
        Err(err) => model.report_error(&err),
    }
}

fn open_in_browser(model: &mut Model) {
    let result = export::render_document(&model.editor.text())
        .and_then(|html| export::write_preview_file(&html))
        .and_then(|path| export::open_in_browser(&path).map(|()| path));
    match result {
        Ok(path) => {
            model.status = "Opened in browser".to_string();
            tracing::info!(path = %path.display(), "opened preview in browser");
        }
        Err(err) => model.report_error(&err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::model::{Overlay, ToastLevel};
    use crate::template::ProjectInfo;

    #[test]
    fn test_import_replaces_document_and_sets_status() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("IN.md");
        std::fs::write(&path, "# Imported\n").unwrap();

        let mut model = Model::new("old", ProjectInfo::default(), (80, 24));
        model.editor.move_end();
        model.pending_effect = Some(PendingEffect::Import(path.clone()));
        App::handle_message_side_effects(&mut model);

        assert_eq!(model.editor.text(), "# Imported\n");
        assert_eq!(model.editor.cursor().line, 0);
        assert_eq!(model.editor.cursor().col, 0);
        assert_eq!(model.status, "Imported: IN.md");
        assert_eq!(model.file_path, Some(path));
        assert_eq!(model.preview.lines()[0], "# Imported");
    }

    #[test]
    fn test_import_failure_opens_modal_and_keeps_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = Model::new("keep me", ProjectInfo::default(), (80, 24));
        model.pending_effect = Some(PendingEffect::Import(dir.path().join("missing.md")));
        App::handle_message_side_effects(&mut model);

        assert_eq!(model.editor.text(), "keep me");
        assert!(matches!(
            model.overlay,
            Some(Overlay::Modal { level: ToastLevel::Error, .. })
        ));
    }

    #[test]
    fn test_export_appends_extension_and_marks_clean() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = Model::new("# Out", ProjectInfo::default(), (80, 24));
        model.editor.insert_char('!');
        model.pending_effect = Some(PendingEffect::Export(dir.path().join("README")));
        App::handle_message_side_effects(&mut model);

        let written = dir.path().join("README.md");
        assert_eq!(std::fs::read_to_string(&written).unwrap(), "!# Out");
        assert_eq!(model.status, "Exported: README.md");
        assert!(!model.editor.is_dirty());
        assert!(matches!(
            &model.overlay,
            Some(Overlay::Modal { title, message, .. })
                if title == "Success" && message.contains("README.md")
        ));
    }

    #[test]
    fn test_export_failure_is_modal_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = Model::new("x", ProjectInfo::default(), (80, 24));
        model.pending_effect = Some(PendingEffect::Export(dir.path().join("no/dir/x.md")));
        App::handle_message_side_effects(&mut model);
        assert!(matches!(
            &model.overlay,
            Some(Overlay::Modal { message, .. }) if message.starts_with("failed to write")
        ));
    }
}
