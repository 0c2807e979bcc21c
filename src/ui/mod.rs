//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - the toolbar, editor pane and live preview pane
//! - status and toast bars
//! - [`style`]: preview tag colors for light and dark terminals
//!
//! Rendering only reads the [`Model`](crate::app::Model); hit testing for
//! mouse input lives here too so it always agrees with what was drawn.

pub mod style;

mod overlays;
mod render;
mod status;

pub use render::{
    Areas, editor_position_at, line_number_width, render, split_areas, toolbar_item_at,
};
