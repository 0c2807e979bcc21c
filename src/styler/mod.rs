//! Live styler for the preview pane.
//!
//! The styler turns the raw buffer into a list of [`StyleTag`]s:
//! - [`classify_line`]: one block tag per line (heading, fence, quote, list, badge)
//! - [`annotate_inline`]: bold, italic, inline code and link spans
//! - [`render_into`]: a full pass over the buffer into a [`DisplaySurface`]
//!
//! A pass is a pure function of the text. It never looks at the tags of a
//! previous pass, so running it twice on the same text yields the same tags.
//!
//! The export renderer in [`crate::export`] is a separate opinion on the same
//! text; the two are allowed to disagree on edge cases such as nested
//! emphasis or unterminated fences.

mod classify;
mod inline;
mod pass;
mod tags;

pub use classify::{classify, classify_line};
pub use inline::annotate_inline;
pub use pass::{DisplaySurface, Preview, render_into, render_pass};
pub use tags::{StyleKind, StyleTag};
