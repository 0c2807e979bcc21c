//! Heading anchors for exported HTML.
//!
//! Ids are slugged the way README tables of contents link to them:
//! non-ASCII dropped, punctuation removed, lowercased, runs of spaces and
//! hyphens joined by a single `-`. Repeats get `_1`, `_2`, ... suffixes.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use comrak::nodes::{AstNode, NodeValue};
use regex::{Captures, Regex};

static HEADING_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<h([1-6]) data-sourcepos="(\d+):[^"]*">"#).expect("valid heading pattern")
});
static SOURCEPOS_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#" data-sourcepos="[^"]*""#).expect("valid sourcepos pattern"));
static NUMBERED_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*)_([0-9]+)$").expect("valid id suffix pattern"));

/// Slug for one heading's text.
pub fn slugify(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii())
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_ascii_whitespace())
        .collect();

    let mut slug = String::with_capacity(kept.len());
    let mut pending_sep = false;
    for ch in kept.trim().chars() {
        if ch == '-' || ch.is_ascii_whitespace() {
            pending_sep = true;
            continue;
        }
        if pending_sep {
            slug.push('-');
            pending_sep = false;
        }
        slug.push(ch.to_ascii_lowercase());
    }
    if pending_sep {
        slug.push('-');
    }
    slug
}

/// Make `id` distinct from everything in `used`, then record it.
fn unique(mut id: String, used: &mut HashSet<String>) -> String {
    while id.is_empty() || used.contains(&id) {
        id = match NUMBERED_ID.captures(&id) {
            Some(caps) => {
                let n: u64 = caps[2].parse().unwrap_or(0);
                format!("{}_{}", &caps[1], n + 1)
            }
            None => format!("{id}_1"),
        };
    }
    used.insert(id.clone());
    id
}

fn heading_text<'a>(node: &'a AstNode<'a>, text: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(t) => text.push_str(t),
        NodeValue::Code(c) => text.push_str(&c.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
        _ => {}
    }
    for child in node.children() {
        heading_text(child, text);
    }
}

/// Anchor id for every heading, keyed by its first source line.
pub fn heading_ids<'a>(root: &'a AstNode<'a>) -> HashMap<usize, String> {
    let mut used = HashSet::new();
    let mut ids = HashMap::new();
    for node in root.descendants() {
        let line = {
            let ast = node.data.borrow();
            if !matches!(ast.value, NodeValue::Heading(_)) {
                continue;
            }
            ast.sourcepos.start.line
        };
        let mut text = String::new();
        heading_text(node, &mut text);
        ids.insert(line, unique(slugify(&text), &mut used));
    }
    ids
}

/// Put the ids on the heading tags of HTML rendered with source positions,
/// and drop every source position attribute.
pub fn apply_heading_ids(html: &str, ids: &HashMap<usize, String>) -> String {
    let tagged = HEADING_OPEN.replace_all(html, |caps: &Captures| {
        let level = &caps[1];
        caps[2]
            .parse::<usize>()
            .ok()
            .and_then(|line| ids.get(&line))
            .map_or_else(
                || format!("<h{level}>"),
                |id| format!(r#"<h{level} id="{id}">"#),
            )
    });
    SOURCEPOS_ATTR.replace_all(&tagged, "").into_owned()
}
