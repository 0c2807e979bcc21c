use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// The closed set of visual annotations the live preview knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKind {
    /// Heading level, always within `1..=6`.
    Heading(u8),
    Bold,
    Italic,
    Code,
    CodeBlock,
    Blockquote,
    ListItem,
    Link,
    Badge,
}

impl StyleKind {
    /// Stable tag name, e.g. `h2` or `code_block`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Heading(1) => "h1",
            Self::Heading(2) => "h2",
            Self::Heading(3) => "h3",
            Self::Heading(4) => "h4",
            Self::Heading(5) => "h5",
            Self::Heading(_) => "h6",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Code => "code",
            Self::CodeBlock => "code_block",
            Self::Blockquote => "blockquote",
            Self::ListItem => "list_item",
            Self::Link => "link",
            Self::Badge => "badge",
        }
    }

    /// Whether this kind covers a whole line rather than an inline span.
    pub const fn is_block(self) -> bool {
        matches!(
            self,
            Self::Heading(_) | Self::CodeBlock | Self::Blockquote | Self::ListItem | Self::Badge
        )
    }
}

impl std::fmt::Display for StyleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A style annotation over `[start, end)` character columns of one line.
///
/// Lines are numbered from 1. Columns count characters, not bytes, so a tag
/// lines up with what the preview pane shows for non-ASCII text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleTag {
    pub kind: StyleKind,
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

impl StyleTag {
    pub const fn new(kind: StyleKind, line: usize, start: usize, end: usize) -> Self {
        Self {
            kind,
            line,
            start,
            end,
        }
    }
}

impl Serialize for StyleTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("StyleTag", 4)?;
        state.serialize_field("tag", self.kind.name())?;
        state.serialize_field("line", &self.line)?;
        state.serialize_field("start", &self.start)?;
        state.serialize_field("end", &self.end)?;
        state.end()
    }
}

/// Convert a byte offset within `line` to a character column.
pub(super) fn char_col(line: &str, byte_idx: usize) -> usize {
    line.get(..byte_idx)
        .map_or_else(|| line.chars().count(), |prefix| prefix.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_names_follow_level() {
        assert_eq!(StyleKind::Heading(1).name(), "h1");
        assert_eq!(StyleKind::Heading(4).name(), "h4");
        assert_eq!(StyleKind::Heading(6).name(), "h6");
    }

    #[test]
    fn test_block_kinds() {
        assert!(StyleKind::Heading(2).is_block());
        assert!(StyleKind::Badge.is_block());
        assert!(!StyleKind::Bold.is_block());
        assert!(!StyleKind::Link.is_block());
    }

    #[test]
    fn test_tag_serializes_with_name() {
        let tag = StyleTag::new(StyleKind::CodeBlock, 3, 0, 7);
        let json = serde_json::to_string(&tag).unwrap();
        assert_eq!(json, r#"{"tag":"code_block","line":3,"start":0,"end":7}"#);
    }

    #[test]
    fn test_char_col_counts_multibyte_once() {
        let line = "café **x**";
        let byte = line.find("**").unwrap();
        assert_eq!(byte, 6);
        assert_eq!(char_col(line, byte), 5);
    }
}
