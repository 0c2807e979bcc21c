use proptest::prelude::*;

use readme_studio::styler::{StyleKind, annotate_inline, classify, classify_line, render_pass};
use readme_studio::template::badge;

/// Markdown-ish text: mostly the characters the patterns care about.
fn markdownish() -> impl Strategy<Value = String> {
    "[#*_`>\\-\\[\\]()!:/.a-z0-9 \n]{0,240}"
}

proptest! {
    #[test]
    fn render_pass_is_idempotent(text in markdownish()) {
        let first = render_pass(&text);
        let second = render_pass(&text);
        prop_assert_eq!(first.tags(), second.tags());
        prop_assert_eq!(first.lines(), second.lines());
    }

    #[test]
    fn render_pass_is_idempotent_for_any_text(text in any::<String>()) {
        prop_assert_eq!(render_pass(&text), render_pass(&text));
    }

    #[test]
    fn every_line_is_kept_verbatim(text in markdownish()) {
        let preview = render_pass(&text);
        let expected: Vec<&str> = text.split('\n').collect();
        prop_assert_eq!(preview.lines(), expected.as_slice());
    }

    #[test]
    fn at_most_one_block_tag_per_line(text in markdownish()) {
        let preview = render_pass(&text);
        for line_number in 1..=preview.line_count() {
            let blocks = preview
                .tags_for_line(line_number)
                .filter(|t| t.kind.is_block())
                .count();
            prop_assert!(blocks <= 1, "line {} has {} block tags", line_number, blocks);
        }
    }

    #[test]
    fn block_tags_span_the_whole_line(text in markdownish()) {
        let preview = render_pass(&text);
        for tag in preview.tags().iter().filter(|t| t.kind.is_block()) {
            let line = &preview.lines()[tag.line - 1];
            prop_assert_eq!(tag.start, 0);
            prop_assert_eq!(tag.end, line.chars().count());
        }
    }

    #[test]
    fn tags_stay_inside_their_line(text in any::<String>()) {
        let preview = render_pass(&text);
        for tag in preview.tags() {
            let line = &preview.lines()[tag.line - 1];
            prop_assert!(tag.start <= tag.end);
            prop_assert!(tag.end <= line.chars().count());
        }
    }

    #[test]
    fn blank_lines_get_no_tags(text in "[ \t\n]{0,40}") {
        prop_assert!(render_pass(&text).tags().is_empty());
    }

    #[test]
    fn single_hash_prefix_always_wins(rest in "[#*>`\\-0-9. a-z]{0,40}") {
        let line = format!("# {rest}");
        prop_assert_eq!(classify(&line), Some(StyleKind::Heading(1)));
    }

    #[test]
    fn classification_ignores_line_number(line in markdownish(), n in 1usize..10_000) {
        let a = classify_line(&line, 1).map(|t| (t.kind, t.start, t.end));
        let b = classify_line(&line, n).map(|t| (t.kind, t.start, t.end));
        prop_assert_eq!(a, b);
    }
}

#[test]
fn heading_priority_uses_literal_prefix_order() {
    assert_eq!(
        classify("# ## not actually h2"),
        Some(StyleKind::Heading(1))
    );
    assert_eq!(classify("## two"), Some(StyleKind::Heading(2)));
    assert_eq!(classify("###### six"), Some(StyleKind::Heading(6)));
    assert_eq!(classify("####### seven"), None);
    assert_eq!(classify("#no space"), None);
}

#[test]
fn list_detection() {
    for line in ["- item", "* item", "3. item", "   - item", "  12. item"] {
        assert_eq!(classify(line), Some(StyleKind::ListItem), "{line:?}");
    }
    assert_eq!(classify("3item"), None);
}

#[test]
fn rule_order_blocks_later_rules() {
    // A fence line mentioning a badge is still a code block
    assert_eq!(
        classify("```![x](https://img.shields.io/badge/a-b-c.svg)"),
        Some(StyleKind::CodeBlock)
    );
    assert_eq!(classify("> - quoted item"), Some(StyleKind::Blockquote));
    assert_eq!(
        classify("![build](https://img.shields.io/badge/build-passing-green.svg)"),
        Some(StyleKind::Badge)
    );
}

#[test]
fn bold_and_code_do_not_double_count() {
    let tags = annotate_inline("**bold** and `code`", 1);
    let spans: Vec<(StyleKind, usize, usize)> =
        tags.iter().map(|t| (t.kind, t.start, t.end)).collect();
    assert_eq!(
        spans,
        vec![(StyleKind::Bold, 0, 8), (StyleKind::Code, 13, 19)]
    );
}

#[test]
fn badge_helper_builds_shields_link() {
    assert_eq!(
        badge("build", "passing", "brightgreen"),
        "![build](https://img.shields.io/badge/build-passing-brightgreen.svg)"
    );
    assert_eq!(
        badge("", " ", ""),
        "![label](https://img.shields.io/badge/label-message-blue.svg)"
    );
}
