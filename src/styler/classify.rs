//! Block-level line classification.

use std::sync::LazyLock;

use regex::Regex;

use super::tags::{StyleKind, StyleTag};

/// Heading prefixes, checked in this order. Each is a literal prefix test.
const HEADING_PREFIXES: [(&str, u8); 6] = [
    ("# ", 1),
    ("## ", 2),
    ("### ", 3),
    ("#### ", 4),
    ("##### ", 5),
    ("###### ", 6),
];

static ORDERED_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\.").expect("valid ordered list pattern"));

/// Pick the block style for a line, first matching rule wins.
pub fn classify(line: &str) -> Option<StyleKind> {
    for (prefix, level) in HEADING_PREFIXES {
        if line.starts_with(prefix) {
            return Some(StyleKind::Heading(level));
        }
    }

    if line.starts_with("```") {
        // No fence state: only the marker lines themselves are tagged.
        return Some(StyleKind::CodeBlock);
    }

    if line.starts_with("> ") {
        return Some(StyleKind::Blockquote);
    }

    let trimmed = line.trim();
    if trimmed.starts_with("- ") || trimmed.starts_with("* ") || ORDERED_LIST.is_match(line) {
        return Some(StyleKind::ListItem);
    }

    if line.contains("![") && line.contains("shields.io") {
        return Some(StyleKind::Badge);
    }

    None
}

/// Classify a line and return its block tag spanning the whole line.
pub fn classify_line(line: &str, line_number: usize) -> Option<StyleTag> {
    classify(line).map(|kind| StyleTag::new(kind, line_number, 0, line.chars().count()))
}
