// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. styler::StyleKind)
    clippy::module_name_repetitions
)]

//! # README Studio
//!
//! A terminal README editor with a live styled preview.
//!
//! README Studio edits markdown in one pane and shows it in another with:
//! - Heading, code, quote, list and badge styling per line
//! - Inline bold, italic, code and link highlighting
//! - Basic and advanced README templates driven by project info
//! - GitHub-flavored HTML export that opens in the browser
//!
//! ## Architecture
//!
//! The app uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`editor`]: Rope-backed text buffer with a caret
//! - [`styler`]: Line classifier, inline annotator and the render pass
//! - [`export`]: Markdown to standalone HTML, browser launch
//! - [`template`]: README templates, project info and snippets
//! - [`files`]: Import and export of README files
//! - [`ui`]: Terminal UI components
//! - [`config`]: Saved command-line defaults

pub mod app;
pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod files;
pub mod perf;
pub mod styler;
pub mod template;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::editor::EditorBuffer;
    pub use crate::error::StudioError;
    pub use crate::styler::{Preview, StyleKind, StyleTag, render_pass};
    pub use crate::template::{ProjectInfo, TemplateKind};
}
