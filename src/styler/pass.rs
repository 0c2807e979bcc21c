//! Full-buffer render pass.

use super::classify::classify_line;
use super::inline::annotate_inline;
use super::tags::StyleTag;

/// Something that shows preview text and accepts style tags.
///
/// A pass always starts with [`DisplaySurface::clear`], so implementations
/// never see tags from a previous pass.
pub trait DisplaySurface {
    /// Drop all text and tags.
    fn clear(&mut self);
    /// Append one line of text verbatim.
    fn insert_line(&mut self, text: &str);
    /// Attach a tag to already inserted text.
    fn apply_tag(&mut self, tag: StyleTag);
}

/// The preview pane's content: lines plus the tags of the last pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preview {
    lines: Vec<String>,
    tags: Vec<StyleTag>,
}

impl Preview {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// All tags in application order.
    pub fn tags(&self) -> &[StyleTag] {
        &self.tags
    }

    /// Tags applied to a 1-based line number, in application order.
    pub fn tags_for_line(&self, line_number: usize) -> impl Iterator<Item = &StyleTag> {
        self.tags.iter().filter(move |t| t.line == line_number)
    }
}

impl DisplaySurface for Preview {
    fn clear(&mut self) {
        self.lines.clear();
        self.tags.clear();
    }

    fn insert_line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn apply_tag(&mut self, tag: StyleTag) {
        self.tags.push(tag);
    }
}

/// Re-render `text` into `surface` from scratch.
///
/// Every line is inserted, blank ones included. Lines that are not blank get
/// at most one block tag followed by their inline tags.
pub fn render_into<S: DisplaySurface + ?Sized>(surface: &mut S, text: &str) {
    surface.clear();
    for (idx, line) in text.split('\n').enumerate() {
        surface.insert_line(line);
        if line.trim().is_empty() {
            continue;
        }
        let line_number = idx + 1;
        if let Some(tag) = classify_line(line, line_number) {
            surface.apply_tag(tag);
        }
        for tag in annotate_inline(line, line_number) {
            surface.apply_tag(tag);
        }
    }
}

/// Run a pass into a fresh [`Preview`].
pub fn render_pass(text: &str) -> Preview {
    let mut preview = Preview::new();
    render_into(&mut preview, text);
    preview
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styler::StyleKind;

    #[test]
    fn test_pass_keeps_blank_lines() {
        let preview = render_pass("# A\n\n\ntext\n");
        assert_eq!(preview.lines(), &["# A", "", "", "text", ""]);
    }

    #[test]
    fn test_pass_skips_whitespace_only_lines() {
        let preview = render_pass("   \n\t\n");
        assert!(preview.tags().is_empty());
    }

    #[test]
    fn test_pass_uses_one_based_lines() {
        let preview = render_pass("text\n## Two");
        assert_eq!(
            preview.tags(),
            &[StyleTag::new(StyleKind::Heading(2), 2, 0, 6)]
        );
    }

    #[test]
    fn test_block_tag_precedes_inline_tags() {
        let preview = render_pass("- **x** item");
        let kinds: Vec<_> = preview.tags().iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![StyleKind::ListItem, StyleKind::Bold]);
    }

    #[test]
    fn test_pass_is_idempotent() {
        let text = "# Title\n\n- *a*\n```rust\nlet x = `y`;\n```\n> [q](u)";
        assert_eq!(render_pass(text), render_pass(text));
    }

    #[test]
    fn test_render_into_replaces_previous_content() {
        let mut preview = render_pass("# Old\n**old**");
        render_into(&mut preview, "plain");
        assert_eq!(preview.lines(), &["plain"]);
        assert!(preview.tags().is_empty());
    }

    #[test]
    fn test_heading_inside_fence_is_still_classified() {
        let preview = render_pass("```\n# not a heading?\n```");
        let line_two: Vec<_> = preview.tags_for_line(2).map(|t| t.kind).collect();
        // The classifier has no fence state, so the heading rule still fires.
        assert_eq!(line_two, vec![StyleKind::Heading(1)]);
        let fences: Vec<_> = preview
            .tags()
            .iter()
            .filter(|t| t.kind == StyleKind::CodeBlock)
            .map(|t| t.line)
            .collect();
        assert_eq!(fences, vec![1, 3]);
    }

    #[test]
    fn test_fence_body_without_markers_is_untagged() {
        let preview = render_pass("```\nlet a = 1;\n```");
        assert_eq!(preview.tags_for_line(2).count(), 0);
    }

    #[test]
    fn test_crlf_lines_keep_carriage_return() {
        let preview = render_pass("# A\r\nb");
        assert_eq!(preview.lines()[0], "# A\r");
        assert_eq!(preview.tags()[0].end, 4);
    }
}
