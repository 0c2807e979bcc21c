//! HTML export through comrak.
//!
//! This is the second renderer in the program. It shares nothing with
//! [`crate::styler`] except the input text.

mod anchors;

use std::cell::Cell;
use std::io::Write as _;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use comrak::{Arena, Options, markdown_to_html, parse_document};

use crate::error::StudioError;

const PREVIEW_PREFIX: &str = "readme-preview-";

const GITHUB_CSS: &str = r#"
body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", "Noto Sans", Helvetica, Arial, sans-serif;
    font-size: 16px;
    line-height: 1.5;
    color: #24292f;
    background-color: #ffffff;
    max-width: 1012px;
    margin: 0 auto;
    padding: 45px;
    box-sizing: border-box;
}
h1, h2, h3, h4, h5, h6 {
    margin-top: 24px;
    margin-bottom: 16px;
    font-weight: 600;
    line-height: 1.25;
}
h1 { font-size: 2em; border-bottom: 1px solid #d0d7de; padding-bottom: 0.3em; margin-top: 0; }
h2 { font-size: 1.5em; border-bottom: 1px solid #d0d7de; padding-bottom: 0.3em; }
h3 { font-size: 1.25em; }
h4 { font-size: 1em; }
h5 { font-size: 0.875em; }
h6 { font-size: 0.85em; color: #656d76; }
p { margin-top: 0; margin-bottom: 16px; }
code {
    background-color: #f6f8fa;
    border-radius: 6px;
    font-size: 85%;
    margin: 0;
    padding: 0.2em 0.4em;
    font-family: ui-monospace, SFMono-Regular, "SF Mono", Consolas, "Liberation Mono", Menlo, monospace;
}
pre {
    background-color: #f6f8fa;
    border-radius: 6px;
    font-size: 85%;
    line-height: 1.45;
    overflow: auto;
    padding: 16px;
    margin-top: 0;
    margin-bottom: 16px;
}
pre code {
    background-color: transparent;
    border: 0;
    display: inline;
    line-height: inherit;
    margin: 0;
    overflow: visible;
    padding: 0;
    word-wrap: normal;
}
blockquote { border-left: 0.25em solid #d0d7de; color: #656d76; margin: 0; padding: 0 1em; }
ul, ol { margin-top: 0; margin-bottom: 16px; padding-left: 2em; }
li + li { margin-top: 0.25em; }
table {
    border-spacing: 0;
    border-collapse: collapse;
    display: block;
    width: max-content;
    max-width: 100%;
    overflow: auto;
    margin-top: 0;
    margin-bottom: 16px;
}
th, td { padding: 6px 13px; border: 1px solid #d0d7de; }
th { background-color: #f6f8fa; font-weight: 600; }
tr:nth-child(2n) { background-color: #f6f8fa; }
img { max-width: 100%; height: auto; box-sizing: content-box; background-color: #ffffff; }
a { color: #0969da; text-decoration: none; }
a:hover { text-decoration: underline; }
strong { font-weight: 600; }
hr { height: 0.25em; padding: 0; margin: 24px 0; background-color: #d0d7de; border: 0; }
img[src*="shields.io"] { display: inline-block; margin: 2px; }
"#;

fn create_options() -> Options {
    let mut options = Options::default();

    options.extension.table = true;
    options.extension.shortcodes = true;

    options.render.hardbreaks = true;
    options.render.unsafe_ = true;
    // Heading ids are matched back to the AST by source line
    options.render.sourcepos = true;

    options
}

fn convert(markdown: &str) -> String {
    let options = create_options();
    let arena = Arena::new();
    let root = parse_document(&arena, markdown, &options);
    let ids = anchors::heading_ids(root);
    anchors::apply_heading_ids(&markdown_to_html(markdown, &options), &ids)
}

/// Convert markdown to an HTML fragment.
///
/// # Errors
///
/// Returns [`StudioError::Render`] if the converter panics.
pub fn markdown_body(markdown: &str) -> Result<String, StudioError> {
    catch_quietly(|| convert(markdown)).map_err(StudioError::Render)
}

thread_local! {
    static QUIET_PANICS: Cell<bool> = const { Cell::new(false) };
}

/// Wrap the current panic hook so panics caught by [`markdown_body`] are
/// not reported. Call after the terminal's own hook is installed.
pub fn silence_converter_panics() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if !QUIET_PANICS.with(Cell::get) {
            previous(info);
        }
    }));
}

/// Run `f`, turning a panic into its message.
fn catch_quietly<R>(f: impl FnOnce() -> R) -> Result<R, String> {
    QUIET_PANICS.with(|quiet| quiet.set(true));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    QUIET_PANICS.with(|quiet| quiet.set(false));
    result.map_err(|payload| {
        let message = panic_message(payload.as_ref());
        tracing::warn!(%message, "markdown converter panicked");
        message
    })
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "markdown converter panicked".to_string())
}

/// Convert markdown to a standalone, styled HTML document.
///
/// # Errors
///
/// Returns [`StudioError::Render`] if the conversion fails.
pub fn render_document(markdown: &str) -> Result<String, StudioError> {
    let body = markdown_body(markdown)?;
    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>README Preview</title>
    <style>{GITHUB_CSS}</style>
</head>
<body>
{body}
</body>
</html>
"#
    ))
}

/// Persist `html` to a fresh temporary `.html` file.
///
/// The file is kept on disk so the browser can load it after we return.
///
/// # Errors
///
/// Returns [`StudioError::PreviewFile`] if the file cannot be created,
/// written, or persisted.
pub fn write_preview_file(html: &str) -> Result<PathBuf, StudioError> {
    let mut file = tempfile::Builder::new()
        .prefix(PREVIEW_PREFIX)
        .suffix(".html")
        .tempfile()
        .map_err(StudioError::PreviewFile)?;
    file.write_all(html.as_bytes())
        .map_err(StudioError::PreviewFile)?;
    let (_, path) = file.keep().map_err(|e| StudioError::PreviewFile(e.error))?;
    tracing::debug!(path = %path.display(), "wrote preview file");
    Ok(path)
}

/// Open `path` with the system's default handler.
///
/// # Errors
///
/// Returns [`StudioError::Launch`] if the handler cannot be spawned.
pub fn open_in_browser(path: &Path) -> Result<(), StudioError> {
    launch(path).map_err(StudioError::Launch)
}

fn launch(path: &Path) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(path).spawn()?;
        Ok(())
    }
    #[cfg(target_os = "windows")]
    {
        use std::process::Stdio;
        std::process::Command::new("cmd")
            .arg("/C")
            .arg("start")
            .arg("")
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        Ok(())
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        use std::process::Stdio;
        std::process::Command::new("xdg-open")
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        Ok(())
    }
}
