//! Error taxonomy for user-triggered operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StudioError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write preview file: {0}")]
    PreviewFile(#[source] io::Error),

    #[error("failed to open browser: {0}")]
    Launch(#[source] io::Error),

    #[error("render failed: {0}")]
    Render(String),
}

impl StudioError {
    /// Render failures only update the status line; everything else is
    /// reported in a modal popup.
    pub const fn is_render_failure(&self) -> bool {
        matches!(self, Self::Render(_))
    }
}
