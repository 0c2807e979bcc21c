//! Theming and color definitions.
//!
//! Maps preview style tags to terminal styles. Colors adapt to light or dark
//! terminals; the mode is set once at startup from `--theme` or detection.

use std::sync::{Mutex, OnceLock, PoisonError};

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::styler::{StyleKind, StyleTag};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Light,
    Dark,
}

static BACKGROUND_OVERRIDE: OnceLock<Mutex<Option<Background>>> = OnceLock::new();

/// Force light or dark palettes; `None` falls back to `COLORFGBG`.
pub fn set_background_mode(mode: Option<Background>) {
    let lock = BACKGROUND_OVERRIDE.get_or_init(|| Mutex::new(None));
    *lock.lock().unwrap_or_else(PoisonError::into_inner) = mode;
}

pub fn is_light_background() -> bool {
    let lock = BACKGROUND_OVERRIDE.get_or_init(|| Mutex::new(None));
    let mode = *lock.lock().unwrap_or_else(PoisonError::into_inner);
    mode.unwrap_or_else(|| background_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref()))
        == Background::Light
}

fn background_from_colorfgbg(colorfgbg: Option<&str>) -> Background {
    let Some(value) = colorfgbg else {
        return Background::Dark;
    };
    let bg_str = value.rsplit(';').next().unwrap_or(value);
    match bg_str.parse::<u8>() {
        Ok(bg) if bg >= 7 => Background::Light,
        _ => Background::Dark,
    }
}

/// Style for a block-level tag covering a whole preview line.
pub fn style_for_block(kind: StyleKind, light_bg: bool) -> Style {
    let pick = |light: Color, dark: Color| if light_bg { light } else { dark };
    match kind {
        StyleKind::Heading(1) => Style::default()
            .fg(pick(Color::Indexed(24), Color::Cyan))
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        StyleKind::Heading(2) => Style::default()
            .fg(pick(Color::Indexed(22), Color::Green))
            .add_modifier(Modifier::BOLD),
        StyleKind::Heading(3) => Style::default()
            .fg(pick(Color::Indexed(58), Color::Yellow))
            .add_modifier(Modifier::BOLD),
        StyleKind::Heading(4 | 5) => Style::default()
            .fg(pick(Color::Indexed(25), Color::Blue))
            .add_modifier(Modifier::BOLD),
        // h6 is muted grey
        StyleKind::Heading(_) => Style::default()
            .fg(pick(Color::Indexed(241), Color::Indexed(246)))
            .add_modifier(Modifier::BOLD),
        StyleKind::CodeBlock => Style::default()
            .fg(pick(Color::Indexed(238), Color::Indexed(250)))
            .bg(pick(Color::Indexed(255), Color::Indexed(235))),
        StyleKind::Blockquote => Style::default()
            .fg(pick(Color::Indexed(241), Color::Indexed(245)))
            .add_modifier(Modifier::ITALIC),
        StyleKind::ListItem => Style::default().fg(pick(Color::Indexed(136), Color::Yellow)),
        StyleKind::Badge => Style::default()
            .fg(Color::White)
            .bg(pick(Color::Indexed(25), Color::Blue)),
        StyleKind::Bold | StyleKind::Italic | StyleKind::Code | StyleKind::Link => {
            Style::default()
        }
    }
}

/// Patch an inline tag over the line's base style.
pub fn style_for_inline(base: Style, kind: StyleKind, light_bg: bool) -> Style {
    match kind {
        StyleKind::Bold => base.add_modifier(Modifier::BOLD),
        StyleKind::Italic => base.add_modifier(Modifier::ITALIC),
        StyleKind::Code => base
            .fg(if light_bg {
                Color::Indexed(124)
            } else {
                Color::LightRed
            })
            .bg(if light_bg {
                Color::Indexed(255)
            } else {
                Color::Indexed(236)
            }),
        StyleKind::Link => base
            .fg(if light_bg {
                Color::Indexed(25)
            } else {
                Color::LightBlue
            })
            .add_modifier(Modifier::UNDERLINED),
        _ => base.patch(style_for_block(kind, light_bg)),
    }
}

/// Build a styled line from preview text and the tags applied to it.
///
/// Tags are applied in order, so a later tag wins where two disagree.
pub fn styled_line<'a>(text: &str, tags: impl IntoIterator<Item = &'a StyleTag>) -> Line<'static> {
    let light_bg = is_light_background();
    let text = text.strip_suffix('\r').unwrap_or(text);
    let chars: Vec<char> = text.chars().collect();
    let mut styles = vec![Style::default(); chars.len()];

    for tag in tags {
        let end = tag.end.min(chars.len());
        let start = tag.start.min(end);
        for style in &mut styles[start..end] {
            *style = if tag.kind.is_block() {
                style.patch(style_for_block(tag.kind, light_bg))
            } else {
                style_for_inline(*style, tag.kind, light_bg)
            };
        }
    }

    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_style = styles.first().copied().unwrap_or_default();
    for (ch, style) in chars.into_iter().zip(styles) {
        if style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        run.push(ch);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_styles_are_bold() {
        for level in 1..=6 {
            let style = style_for_block(StyleKind::Heading(level), false);
            assert!(style.add_modifier.contains(Modifier::BOLD));
        }
    }

    #[test]
    fn test_h1_is_underlined() {
        let style = style_for_block(StyleKind::Heading(1), false);
        assert!(style.add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_light_palette_differs_for_headings() {
        assert_ne!(
            style_for_block(StyleKind::Heading(2), true),
            style_for_block(StyleKind::Heading(2), false)
        );
    }

    #[test]
    fn test_colorfgbg_detection() {
        assert_eq!(background_from_colorfgbg(None), Background::Dark);
        assert_eq!(background_from_colorfgbg(Some("0;15")), Background::Light);
        assert_eq!(background_from_colorfgbg(Some("15;0")), Background::Dark);
        assert_eq!(background_from_colorfgbg(Some("junk")), Background::Dark);
    }

    #[test]
    fn test_styled_line_splits_inline_runs() {
        let tags = [
            StyleTag::new(StyleKind::ListItem, 1, 0, 13),
            StyleTag::new(StyleKind::Bold, 1, 2, 9),
        ];
        let line = styled_line("- **bold** x", &tags);
        let texts: Vec<&str> = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(texts, vec!["- ", "**bold*", "* x"]);
        assert!(line.spans[1].style.add_modifier.contains(Modifier::BOLD));
        assert!(!line.spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_styled_line_without_tags_is_plain() {
        let line = styled_line("plain", std::iter::empty());
        assert_eq!(line.spans.len(), 1);
        assert_eq!(line.spans[0].style, Style::default());
    }

    #[test]
    fn test_styled_line_counts_chars_not_bytes() {
        let tags = [StyleTag::new(StyleKind::Code, 1, 2, 5)];
        let line = styled_line("é `x` ü", &tags);
        let texts: Vec<&str> = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(texts, vec!["é ", "`x`", " ü"]);
    }

    #[test]
    fn test_styled_line_drops_carriage_return() {
        let line = styled_line("text\r", std::iter::empty());
        assert_eq!(line.spans[0].content, "text");
    }
}
