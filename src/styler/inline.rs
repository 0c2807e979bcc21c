//! Inline span detection: bold, italic, inline code and links.
//!
//! Each pattern scans the whole line independently, so spans of different
//! kinds may overlap (bold text inside a link label gets both tags).

use std::sync::LazyLock;

use regex::Regex;

use super::tags::{StyleKind, StyleTag, char_col};

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*|__(.*?)__").expect("valid bold pattern"));

// Candidates only; the doubled-delimiter exclusion is checked in `italic_spans`.
static ITALIC_CANDIDATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*[^*]+\*|_[^_]+_").expect("valid italic pattern"));

static CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("valid code pattern"));

static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").expect("valid link pattern"));

/// Find inline spans in one line, in pattern order: bold, italic, code, link.
pub fn annotate_inline(line: &str, line_number: usize) -> Vec<StyleTag> {
    let mut tags = Vec::new();
    push_matches(&mut tags, &BOLD, StyleKind::Bold, line, line_number);
    for (start, end) in italic_spans(line) {
        tags.push(StyleTag::new(
            StyleKind::Italic,
            line_number,
            char_col(line, start),
            char_col(line, end),
        ));
    }
    push_matches(&mut tags, &CODE, StyleKind::Code, line, line_number);
    push_matches(&mut tags, &LINK, StyleKind::Link, line, line_number);
    tags
}

fn push_matches(
    tags: &mut Vec<StyleTag>,
    pattern: &Regex,
    kind: StyleKind,
    line: &str,
    line_number: usize,
) {
    tags.extend(pattern.find_iter(line).map(|m| {
        StyleTag::new(
            kind,
            line_number,
            char_col(line, m.start()),
            char_col(line, m.end()),
        )
    }));
}

/// Byte ranges of single-delimiter emphasis.
///
/// A candidate `*text*` (or `_text_`) is accepted only when the delimiter is
/// not doubled on either side: the byte before the opening delimiter and the
/// byte after the closing one must differ from it. A rejected candidate
/// resumes the scan one byte after its start, so `**a*` can still yield `*a*`
/// starting at the second star if its neighbours allow it.
fn italic_spans(line: &str) -> Vec<(usize, usize)> {
    let bytes = line.as_bytes();
    let mut spans = Vec::new();
    let mut pos = 0;
    while pos < line.len() {
        let Some(m) = ITALIC_CANDIDATE.find_at(line, pos) else {
            break;
        };
        let delim = bytes[m.start()];
        let doubled_before = m.start() > 0 && bytes[m.start() - 1] == delim;
        let doubled_after = bytes.get(m.end()) == Some(&delim);
        if doubled_before || doubled_after {
            // Delimiters are ASCII, so start + 1 is a char boundary.
            pos = m.start() + 1;
        } else {
            spans.push((m.start(), m.end()));
            pos = m.end();
        }
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans_of(line: &str, kind: StyleKind) -> Vec<(usize, usize)> {
        annotate_inline(line, 1)
            .into_iter()
            .filter(|t| t.kind == kind)
            .map(|t| (t.start, t.end))
            .collect()
    }

    #[test]
    fn test_bold_and_code_are_independent() {
        let tags = annotate_inline("**bold** and `code`", 1);
        assert_eq!(
            tags,
            vec![
                StyleTag::new(StyleKind::Bold, 1, 0, 8),
                StyleTag::new(StyleKind::Code, 1, 13, 19),
            ]
        );
    }

    #[test]
    fn test_bold_underscores() {
        assert_eq!(spans_of("a __strong__ b", StyleKind::Bold), vec![(2, 12)]);
    }

    #[test]
    fn test_bold_is_non_greedy() {
        assert_eq!(
            spans_of("**a** and **b**", StyleKind::Bold),
            vec![(0, 5), (10, 15)]
        );
    }

    #[test]
    fn test_empty_bold_still_matches() {
        assert_eq!(spans_of("****", StyleKind::Bold), vec![(0, 4)]);
    }

    #[test]
    fn test_italic_star_and_underscore() {
        assert_eq!(spans_of("an *em* word", StyleKind::Italic), vec![(3, 7)]);
        assert_eq!(spans_of("an _em_ word", StyleKind::Italic), vec![(3, 7)]);
    }

    #[test]
    fn test_italic_ignores_bold_delimiters() {
        assert!(spans_of("**bold**", StyleKind::Italic).is_empty());
        assert!(spans_of("__bold__", StyleKind::Italic).is_empty());
    }

    #[test]
    fn test_italic_next_to_bold() {
        assert_eq!(
            spans_of("**b** and *i*", StyleKind::Italic),
            vec![(10, 13)]
        );
    }

    #[test]
    fn test_italic_multiple_spans() {
        assert_eq!(
            spans_of("*a* _b_ *c*", StyleKind::Italic),
            vec![(0, 3), (4, 7), (8, 11)]
        );
    }

    #[test]
    fn test_italic_unclosed_is_ignored() {
        assert!(spans_of("* item without close", StyleKind::Italic).is_empty());
    }

    #[test]
    fn test_snake_case_reads_as_italic() {
        // Same opinion as the regex scan it mirrors: `_b_` inside a word matches.
        assert_eq!(spans_of("a_b_c", StyleKind::Italic), vec![(1, 4)]);
    }

    #[test]
    fn test_inline_code() {
        assert_eq!(
            spans_of("use `cargo` or `make`", StyleKind::Code),
            vec![(4, 11), (15, 21)]
        );
        assert!(spans_of("empty `` ticks", StyleKind::Code).is_empty());
    }

    #[test]
    fn test_link_covers_label_and_url() {
        assert_eq!(
            spans_of("see [docs](https://example.com) now", StyleKind::Link),
            vec![(4, 31)]
        );
    }

    #[test]
    fn test_badge_image_contains_link_span() {
        let line = "![build](https://img.shields.io/badge/build-passing-brightgreen.svg)";
        assert_eq!(spans_of(line, StyleKind::Link), vec![(1, line.len())]);
    }

    #[test]
    fn test_overlapping_kinds_are_kept() {
        let tags = annotate_inline("[**bold label**](x)", 1);
        assert!(tags.contains(&StyleTag::new(StyleKind::Bold, 1, 1, 15)));
        assert!(tags.contains(&StyleTag::new(StyleKind::Link, 1, 0, 19)));
    }

    #[test]
    fn test_pattern_order_in_output() {
        let tags = annotate_inline("[l](u) `c` *i* **b**", 1);
        let kinds: Vec<_> = tags.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                StyleKind::Bold,
                StyleKind::Italic,
                StyleKind::Code,
                StyleKind::Link
            ]
        );
    }

    #[test]
    fn test_columns_are_characters() {
        assert_eq!(spans_of("é **x**", StyleKind::Bold), vec![(2, 7)]);
    }
}
