//! The document buffer behind the editor pane.
//!
//! A rope with a character-column caret. Everything the rest of the program
//! knows about the README comes from [`EditorBuffer::text`].

mod buffer;

pub use buffer::{Cursor, Direction, EditorBuffer};
