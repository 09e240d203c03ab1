//! Inline transformer - rewrites one logical line into a span tree.
//!
//! A cursor scans the line left to right and tries each construct at the
//! current position; precedence is the try order, so every character is
//! classified exactly once. Unclosed constructs degrade to literal text.

use crate::core::ast::InlineSpan;

/// Emphasis and link labels nest through recursion; beyond this depth the
/// remaining content is kept as literal text.
const MAX_INLINE_DEPTH: usize = 32;

/// Parses inline markup into a sequence of spans covering the entire input.
pub fn parse_inline(text: &str) -> Vec<InlineSpan> {
    parse_at_depth(text, 0)
}

fn parse_at_depth(text: &str, depth: usize) -> Vec<InlineSpan> {
    if depth > MAX_INLINE_DEPTH {
        return vec![InlineSpan::PlainText(text.to_string())];
    }

    let mut scanner = Scanner::new(text);
    let mut spans = Vec::new();
    let mut literal = String::new();

    while let Some(ch) = scanner.peek() {
        let parsed = match ch {
            '`' => try_code_span(&mut scanner),
            '!' => try_image(&mut scanner),
            '[' => try_wikilink(&mut scanner).or_else(|| try_link(&mut scanner, depth)),
            '*' | '_' => try_emphasis(&mut scanner, ch, depth),
            '~' => try_strikethrough(&mut scanner, depth),
            _ => None,
        };
        match parsed {
            Some(span) => {
                flush_literal(&mut spans, &mut literal);
                spans.push(span);
            }
            None => {
                literal.push(ch);
                scanner.advance(ch.len_utf8());
            }
        }
    }

    flush_literal(&mut spans, &mut literal);
    spans
}

fn flush_literal(spans: &mut Vec<InlineSpan>, literal: &mut String) {
    if !literal.is_empty() {
        spans.push(InlineSpan::PlainText(std::mem::take(literal)));
    }
}

/// Byte cursor over one line. All construct delimiters are ASCII, so the
/// positions handed around here always fall on char boundaries.
struct Scanner<'a> {
    s: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(s: &'a str) -> Self {
        Self { s, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.s[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(&mut self, n: usize) {
        self.pos += n;
    }
}

/// `` `code` `` - content is kept literal and suppresses all other parsing.
fn try_code_span(scanner: &mut Scanner<'_>) -> Option<InlineSpan> {
    let inner = scanner.rest().strip_prefix('`')?;
    let close = inner.find('`')?;
    if close == 0 {
        return None;
    }
    let content = &inner[..close];
    scanner.advance(close + 2);
    Some(InlineSpan::Code(content.to_string()))
}

/// `![alt](src)` - alt may be empty, src may not.
fn try_image(scanner: &mut Scanner<'_>) -> Option<InlineSpan> {
    let after = scanner.rest().strip_prefix("![")?;
    let alt_end = after.find(']')?;
    let alt = &after[..alt_end];
    let src_body = after[alt_end + 1..].strip_prefix('(')?;
    let src_end = src_body.find(')')?;
    if src_end == 0 {
        return None;
    }
    let src = &src_body[..src_end];
    scanner.advance(2 + alt_end + 2 + src_end + 1);
    Some(InlineSpan::Image {
        alt: alt.to_string(),
        src: src.to_string(),
    })
}

/// `[[Target]]` or `[[Target|Display Text]]`. The target may not contain
/// `]` or `|`; the display text may not contain `]`.
fn try_wikilink(scanner: &mut Scanner<'_>) -> Option<InlineSpan> {
    let after = scanner.rest().strip_prefix("[[")?;
    let target_end = after.find(|c: char| c == '|' || c == ']')?;
    if target_end == 0 {
        return None;
    }
    let target = &after[..target_end];
    let tail = &after[target_end..];

    if let Some(display_body) = tail.strip_prefix('|') {
        let display_end = display_body.find(']')?;
        if display_end == 0 || !display_body[display_end..].starts_with("]]") {
            return None;
        }
        let label = &display_body[..display_end];
        scanner.advance(2 + target_end + 1 + display_end + 2);
        return Some(InlineSpan::WikiLink {
            target: target.to_string(),
            label: label.to_string(),
        });
    }

    if !tail.starts_with("]]") {
        return None;
    }
    scanner.advance(2 + target_end + 2);
    Some(InlineSpan::WikiLink {
        target: target.to_string(),
        label: target.to_string(),
    })
}

/// `[text](url)` - the label is parsed recursively, the url stays literal.
fn try_link(scanner: &mut Scanner<'_>, depth: usize) -> Option<InlineSpan> {
    let after = scanner.rest().strip_prefix('[')?;
    let text_end = after.find(']')?;
    if text_end == 0 {
        return None;
    }
    let text = &after[..text_end];
    let url_body = after[text_end + 1..].strip_prefix('(')?;
    let url_end = url_body.find(')')?;
    if url_end == 0 {
        return None;
    }
    let url = &url_body[..url_end];
    scanner.advance(1 + text_end + 2 + url_end + 1);
    Some(InlineSpan::Link {
        text: parse_at_depth(text, depth + 1),
        url: url.to_string(),
    })
}

/// `***x***`, `**x**`, `*x*` and the underscore forms, longest marker
/// first. The closer is the nearest later occurrence of the same marker
/// with at least one character of content between.
fn try_emphasis(scanner: &mut Scanner<'_>, delim: char, depth: usize) -> Option<InlineSpan> {
    let rest = scanner.rest();
    let markers: [&str; 3] = if delim == '*' {
        ["***", "**", "*"]
    } else {
        ["___", "__", "_"]
    };
    for marker in markers {
        if !rest.starts_with(marker) {
            continue;
        }
        let body = &rest[marker.len()..];
        let Some(close) = find_closer(body, marker) else {
            continue;
        };
        let content = &body[..close];
        scanner.advance(marker.len() * 2 + close);
        let children = parse_at_depth(content, depth + 1);
        return Some(match marker.len() {
            3 => InlineSpan::BoldItalic(children),
            2 => InlineSpan::Bold(children),
            _ => InlineSpan::Italic(children),
        });
    }
    None
}

/// `~~text~~`
fn try_strikethrough(scanner: &mut Scanner<'_>, depth: usize) -> Option<InlineSpan> {
    let body = scanner.rest().strip_prefix("~~")?;
    let close = find_closer(body, "~~")?;
    let content = &body[..close];
    scanner.advance(4 + close);
    Some(InlineSpan::Strikethrough(parse_at_depth(content, depth + 1)))
}

/// Nearest occurrence of `marker` in `body` leaving non-empty content.
/// An occurrence at offset 0 would make the span empty; in that case the
/// search resumes one byte in, which is safe because `body` then starts
/// with the ASCII marker itself.
fn find_closer(body: &str, marker: &str) -> Option<usize> {
    match body.find(marker) {
        Some(0) => body[1..].find(marker).map(|j| j + 1),
        found => found,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ast::InlineSpan::*;

    fn text(s: &str) -> InlineSpan {
        PlainText(s.to_string())
    }

    #[test]
    fn test_plain_text_single_span() {
        assert_eq!(parse_inline("hello world"), vec![text("hello world")]);
    }

    #[test]
    fn test_bold_italic_combined() {
        assert_eq!(
            parse_inline("***loud***"),
            vec![BoldItalic(vec![text("loud")])]
        );
    }

    #[test]
    fn test_bold_and_italic_markers() {
        assert_eq!(
            parse_inline("**b** and _i_"),
            vec![
                Bold(vec![text("b")]),
                text(" and "),
                Italic(vec![text("i")]),
            ]
        );
    }

    #[test]
    fn test_unclosed_emphasis_stays_literal() {
        assert_eq!(parse_inline("2 * 3 = 6"), vec![text("2 * 3 = 6")]);
    }

    #[test]
    fn test_snake_case_first_pair_emphasized() {
        // Matches the lazy-regex behavior: the nearest underscore pair wins.
        assert_eq!(
            parse_inline("snake_case_words"),
            vec![text("snake"), Italic(vec![text("case")]), text("words")]
        );
    }

    #[test]
    fn test_code_span_suppresses_inner_markup() {
        assert_eq!(
            parse_inline("`*[[x]]*`"),
            vec![Code("*[[x]]*".to_string())]
        );
    }

    #[test]
    fn test_unclosed_code_span_stays_literal() {
        assert_eq!(parse_inline("`oops"), vec![text("`oops")]);
    }

    #[test]
    fn test_image_before_link() {
        assert_eq!(
            parse_inline("![alt text](pic.png)"),
            vec![Image {
                alt: "alt text".to_string(),
                src: "pic.png".to_string(),
            }]
        );
    }

    #[test]
    fn test_link_label_parsed_recursively() {
        assert_eq!(
            parse_inline("[**docs**](https://example.com)"),
            vec![Link {
                text: vec![Bold(vec![text("docs")])],
                url: "https://example.com".to_string(),
            }]
        );
    }

    #[test]
    fn test_wikilink_simple_and_aliased() {
        assert_eq!(
            parse_inline("[[Dragon]]"),
            vec![WikiLink {
                target: "Dragon".to_string(),
                label: "Dragon".to_string(),
            }]
        );
        assert_eq!(
            parse_inline("[[Dragon|the wyrm]]"),
            vec![WikiLink {
                target: "Dragon".to_string(),
                label: "the wyrm".to_string(),
            }]
        );
    }

    #[test]
    fn test_unclosed_wikilink_stays_literal() {
        assert_eq!(parse_inline("[[Dragon"), vec![text("[[Dragon")]);
    }

    #[test]
    fn test_strikethrough() {
        assert_eq!(
            parse_inline("a ~~b~~ c"),
            vec![text("a "), Strikethrough(vec![text("b")]), text(" c")]
        );
    }

    #[test]
    fn test_multibyte_content_in_emphasis() {
        assert_eq!(
            parse_inline("*龍*"),
            vec![Italic(vec![text("龍")])]
        );
    }

    #[test]
    fn test_empty_emphasis_skips_to_later_closer() {
        // "****x**" pairs the first two asterisks with the closer after
        // "**x", the same answer lazy regex matching gives.
        assert_eq!(
            parse_inline("****x**"),
            vec![Bold(vec![text("**x")])]
        );
    }

    #[test]
    fn test_nested_mixed_emphasis() {
        assert_eq!(
            parse_inline("**a _b_**"),
            vec![Bold(vec![text("a "), Italic(vec![text("b")])])]
        );
    }
}
