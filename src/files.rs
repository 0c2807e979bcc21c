//! Import and export of the document buffer.
//!
//! Both directions are verbatim: no newline normalization, no BOM handling,
//! no backup on overwrite.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StudioError;

/// Extension appended on export when the chosen path has none.
pub const DEFAULT_EXTENSION: &str = "md";

/// Read a whole UTF-8 file.
///
/// # Errors
///
/// Returns [`StudioError::Read`] if the file is missing, unreadable or not
/// valid UTF-8.
pub fn import_text(path: &Path) -> Result<String, StudioError> {
    let text = fs::read_to_string(path).map_err(|source| StudioError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "imported file");
    Ok(text)
}

/// Write `text` to `path`, adding the default extension when missing.
///
/// Returns the path actually written.
///
/// # Errors
///
/// Returns [`StudioError::Write`] if the file cannot be created or written.
pub fn export_text(path: &Path, text: &str) -> Result<PathBuf, StudioError> {
    let target = with_default_extension(path);
    fs::write(&target, text).map_err(|source| StudioError::Write {
        path: target.clone(),
        source,
    })?;
    tracing::debug!(path = %target.display(), bytes = text.len(), "exported file");
    Ok(target)
}

/// Append `.md` to paths without an extension.
pub fn with_default_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(DEFAULT_EXTENSION)
    }
}

/// File name for status messages, falling back to the full path.
pub fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |n| n.to_string_lossy().to_string(),
    )
}
