use proptest::prelude::*;
use tempfile::tempdir;

use readme_studio::editor::EditorBuffer;
use readme_studio::error::StudioError;
use readme_studio::files::{export_text, import_text};

#[test]
fn import_then_export_reproduces_bytes() {
    let dir = tempdir().unwrap();
    let original = "# Title\r\n\r\nMixed\nline endings, tabs\t, unicode ✓\n\n\n";
    let source = dir.path().join("source.md");
    std::fs::write(&source, original).unwrap();

    let text = import_text(&source).unwrap();
    let buffer = EditorBuffer::from_text(&text);
    let written = export_text(&dir.path().join("copy.md"), &buffer.text()).unwrap();

    assert_eq!(std::fs::read(written).unwrap(), original.as_bytes());
}

#[test]
fn export_without_extension_writes_markdown_file() {
    let dir = tempdir().unwrap();
    let written = export_text(&dir.path().join("README"), "x").unwrap();
    assert_eq!(written, dir.path().join("README.md"));
    assert!(written.exists());
}

#[test]
fn export_keeps_existing_extension() {
    let dir = tempdir().unwrap();
    let written = export_text(&dir.path().join("notes.txt"), "x").unwrap();
    assert_eq!(written, dir.path().join("notes.txt"));
}

#[test]
fn import_of_missing_file_is_read_error() {
    let dir = tempdir().unwrap();
    let err = import_text(&dir.path().join("missing.md")).unwrap_err();
    assert!(matches!(err, StudioError::Read { .. }));
    assert!(!err.is_render_failure());
}

proptest! {
    #[test]
    fn round_trip_through_buffer_is_verbatim(text in any::<String>()) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, &text).unwrap();

        let imported = import_text(&path).unwrap();
        let buffer = EditorBuffer::from_text(&imported);
        let written = export_text(&path, &buffer.text()).unwrap();
        prop_assert_eq!(std::fs::read_to_string(written).unwrap(), text);
    }
}
