//! Block splitter - partitions normalized text into block-level constructs.
//!
//! A single left-to-right scan with an explicit line cursor; the first
//! matching rule wins and multi-line rules consume greedily while their
//! condition holds. Malformed constructs degrade to the nearest sane
//! interpretation instead of failing.

use crate::core::ast::{Alignment, Block, Table};
use crate::error::{Error, Result};
use crate::parser::infobox::parse_infobox;
use crate::parser::inline::parse_inline;
use once_cell::sync::Lazy;
use regex::Regex;

/// Blockquotes are the only recursive block; deeper nesting than this is
/// treated as pathological input and degraded at the render boundary.
const MAX_QUOTE_DEPTH: usize = 64;

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());
static UNORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*+]\s").unwrap());
static ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+\.\s").unwrap());
static HORIZONTAL_RULE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(-{3,}|\*{3,}|_{3,})$").unwrap());
static TABLE_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\s|:-]+$").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Splits a document into blocks.
pub struct BlockParser;

impl BlockParser {
    /// Parses normalized-newline text into an ordered block sequence.
    pub fn parse(text: &str) -> Result<Vec<Block>> {
        Self::parse_at_depth(text, 0)
    }

    fn parse_at_depth(text: &str, depth: usize) -> Result<Vec<Block>> {
        if depth > MAX_QUOTE_DEPTH {
            return Err(Error::NestingLimit(depth));
        }

        let lines: Vec<&str> = text.split('\n').collect();
        let mut blocks = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i];
            let stripped = line.trim_start();

            // Fenced code block: verbatim until the closing fence or EOF.
            if let Some(fence_rest) = stripped.strip_prefix("```") {
                let language = fence_rest.trim().to_string();
                let mut code_lines = Vec::new();
                i += 1;
                while i < lines.len() && !lines[i].trim_start().starts_with("```") {
                    code_lines.push(lines[i]);
                    i += 1;
                }
                if i < lines.len() {
                    i += 1; // closing fence consumed and discarded
                }
                blocks.push(Block::CodeBlock {
                    language,
                    code: code_lines.join("\n"),
                });
                continue;
            }

            // Template, only when `}}` closes on the same line; otherwise the
            // line falls through to paragraph handling below.
            if stripped.starts_with("{{") {
                if let (Some(open), Some(end)) = (line.find("{{"), line.find("}}")) {
                    if end >= open + 2 {
                        let inner = &line[open + 2..end];
                        match parse_infobox(inner) {
                            Some(infobox) => blocks.push(Block::Infobox(infobox)),
                            None => blocks.push(Block::Literal(inner.to_string())),
                        }
                        i += 1;
                        continue;
                    }
                }
            }

            // ATX heading
            if let Some(caps) = HEADING.captures(line) {
                let raw = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
                blocks.push(Block::Heading {
                    level: caps.get(1).map(|m| m.as_str().len()).unwrap_or(1),
                    anchor: heading_anchor(raw),
                    content: parse_inline(raw),
                });
                i += 1;
                continue;
            }

            // Blockquote: strip one marker per line and recurse.
            if line.starts_with('>') {
                let mut quoted = Vec::new();
                while i < lines.len() && lines[i].starts_with('>') {
                    quoted.push(strip_quote_marker(lines[i]));
                    i += 1;
                }
                let inner = Self::parse_at_depth(&quoted.join("\n"), depth + 1)?;
                blocks.push(Block::Blockquote(inner));
                continue;
            }

            // Unordered list
            if UNORDERED_ITEM.is_match(line) {
                let mut items = Vec::new();
                while i < lines.len() && UNORDERED_ITEM.is_match(lines[i]) {
                    items.push(parse_inline(strip_marker(lines[i], &UNORDERED_ITEM)));
                    i += 1;
                }
                blocks.push(Block::UnorderedList(items));
                continue;
            }

            // Ordered list: authored numbers are discarded.
            if ORDERED_ITEM.is_match(line) {
                let mut items = Vec::new();
                while i < lines.len() && ORDERED_ITEM.is_match(lines[i]) {
                    items.push(parse_inline(strip_marker(lines[i], &ORDERED_ITEM)));
                    i += 1;
                }
                blocks.push(Block::OrderedList(items));
                continue;
            }

            // Table: requires the very next raw line to be a separator row.
            if line.contains('|')
                && i + 1 < lines.len()
                && TABLE_SEPARATOR.is_match(lines[i + 1])
            {
                let header = split_cells(line)
                    .iter()
                    .map(|cell| parse_inline(cell.trim()))
                    .collect();
                let alignments = split_cells(lines[i + 1])
                    .iter()
                    .map(|cell| cell_alignment(cell))
                    .collect();
                i += 2;

                let mut rows = Vec::new();
                while i < lines.len() && lines[i].contains('|') {
                    rows.push(
                        split_cells(lines[i])
                            .iter()
                            .map(|cell| parse_inline(cell.trim()))
                            .collect(),
                    );
                    i += 1;
                }
                blocks.push(Block::Table(Table {
                    alignments,
                    header,
                    rows,
                }));
                continue;
            }

            // Horizontal rule
            if HORIZONTAL_RULE.is_match(line.trim()) {
                blocks.push(Block::HorizontalRule);
                i += 1;
                continue;
            }

            // Blank lines separate nothing by themselves.
            if line.trim().is_empty() {
                i += 1;
                continue;
            }

            // Paragraph: the current line is always consumed, then the run
            // extends until the next control line. Hard breaks inside the
            // run are not preserved.
            let mut para_lines = vec![line];
            i += 1;
            while i < lines.len() && !is_paragraph_break(lines[i]) {
                para_lines.push(lines[i]);
                i += 1;
            }
            blocks.push(Block::Paragraph(parse_inline(&para_lines.join(" "))));
        }

        Ok(blocks)
    }
}

fn is_paragraph_break(line: &str) -> bool {
    line.trim().is_empty()
        || HEADING.is_match(line)
        || line.starts_with('>')
        || UNORDERED_ITEM.is_match(line)
        || ORDERED_ITEM.is_match(line)
        || HORIZONTAL_RULE.is_match(line.trim())
        || line.trim_start().starts_with("```")
        || line.trim_start().starts_with("{{")
}

/// Strips the leading `>` and at most one following whitespace character.
fn strip_quote_marker(line: &str) -> &str {
    let rest = &line[1..];
    rest.strip_prefix(|c: char| c.is_whitespace()).unwrap_or(rest)
}

/// Strips a list marker (plus its single trailing whitespace character).
fn strip_marker<'a>(line: &'a str, marker: &Regex) -> &'a str {
    match marker.find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    }
}

/// Splits a table line on `|`, dropping an empty leading/trailing cell
/// produced by outer pipes.
fn split_cells(line: &str) -> Vec<&str> {
    let mut cells: Vec<&str> = line.split('|').collect();
    if cells.len() > 1 {
        if cells.first().is_some_and(|c| c.trim().is_empty()) {
            cells.remove(0);
        }
        if cells.last().is_some_and(|c| c.trim().is_empty()) {
            cells.pop();
        }
    }
    cells
}

fn cell_alignment(cell: &str) -> Alignment {
    let trimmed = cell.trim();
    if trimmed.starts_with(':') && trimmed.ends_with(':') {
        Alignment::Center
    } else if trimmed.ends_with(':') {
        Alignment::Right
    } else {
        Alignment::Left
    }
}

/// Anchor id from the raw heading text: lowercase, whitespace runs become
/// hyphens, everything that is not an ASCII word character, hyphen or CJK
/// ideograph is stripped.
fn heading_anchor(text: &str) -> String {
    let lowered = text.to_lowercase();
    let hyphenated = WHITESPACE_RUN.replace_all(&lowered, "-");
    hyphenated
        .chars()
        .filter(|c| {
            c.is_ascii_alphanumeric()
                || *c == '_'
                || *c == '-'
                || ('\u{4e00}'..='\u{9fff}').contains(c)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ast::InlineSpan;

    fn parse(text: &str) -> Vec<Block> {
        BlockParser::parse(text).expect("parse should work")
    }

    #[test]
    fn test_heading_levels_and_anchor() {
        let blocks = parse("### Fire & Ice");
        match &blocks[0] {
            Block::Heading { level, anchor, .. } => {
                assert_eq!(*level, 3);
                assert_eq!(anchor, "fire--ice");
            }
            other => panic!("expected heading, got {:?}", other),
        }
    }

    #[test]
    fn test_heading_anchor_keeps_cjk() {
        let blocks = parse("# 龍之谷 Overview");
        match &blocks[0] {
            Block::Heading { anchor, .. } => assert_eq!(anchor, "龍之谷-overview"),
            other => panic!("expected heading, got {:?}", other),
        }
    }

    #[test]
    fn test_seven_hashes_is_a_paragraph() {
        let blocks = parse("####### too deep");
        assert!(matches!(blocks[0], Block::Paragraph(_)));
    }

    #[test]
    fn test_paragraph_lines_join_with_space() {
        let blocks = parse("line one\nline two");
        assert_eq!(
            blocks,
            vec![Block::Paragraph(vec![InlineSpan::PlainText(
                "line one line two".to_string()
            )])]
        );
    }

    #[test]
    fn test_unterminated_fence_consumes_to_eof() {
        let blocks = parse("```rust\nlet a = 1;\nlet b = 2;");
        assert_eq!(
            blocks,
            vec![Block::CodeBlock {
                language: "rust".to_string(),
                code: "let a = 1;\nlet b = 2;".to_string(),
            }]
        );
    }

    #[test]
    fn test_fence_language_tag_from_indented_fence() {
        let blocks = parse("  ```js\nx\n```");
        assert_eq!(
            blocks,
            vec![Block::CodeBlock {
                language: "js".to_string(),
                code: "x".to_string(),
            }]
        );
    }

    #[test]
    fn test_blockquote_recurses_into_blocks() {
        let blocks = parse("> # Title\n> text");
        match &blocks[0] {
            Block::Blockquote(inner) => {
                assert!(matches!(inner[0], Block::Heading { .. }));
                assert!(matches!(inner[1], Block::Paragraph(_)));
            }
            other => panic!("expected blockquote, got {:?}", other),
        }
    }

    #[test]
    fn test_quote_nesting_past_limit_errors() {
        let mut text = String::new();
        for _ in 0..(MAX_QUOTE_DEPTH + 2) {
            text.push('>');
        }
        text.push_str(" deep");
        assert!(BlockParser::parse(&text).is_err());
    }

    #[test]
    fn test_list_markers_and_numbering_discarded() {
        let blocks = parse("- a\n* b\n+ c");
        assert_eq!(
            blocks,
            vec![Block::UnorderedList(vec![
                vec![InlineSpan::PlainText("a".to_string())],
                vec![InlineSpan::PlainText("b".to_string())],
                vec![InlineSpan::PlainText("c".to_string())],
            ])]
        );

        let blocks = parse("7. first\n2. second");
        assert!(matches!(&blocks[0], Block::OrderedList(items) if items.len() == 2));
    }

    #[test]
    fn test_table_lookahead_must_hit_next_raw_line() {
        // No separator on the very next line: plain paragraph.
        let blocks = parse("A|B\n\n---|---");
        assert!(matches!(blocks[0], Block::Paragraph(_)));
    }

    #[test]
    fn test_table_alignments() {
        let blocks = parse("A|B|C\n:-:|---:|---\nx|y|z");
        match &blocks[0] {
            Block::Table(table) => {
                assert_eq!(
                    table.alignments,
                    vec![Alignment::Center, Alignment::Right, Alignment::Left]
                );
                assert_eq!(table.header.len(), 3);
                assert_eq!(table.rows.len(), 1);
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_table_outer_pipes_dropped() {
        let blocks = parse("| A | B |\n| --- | --- |\n| 1 | 2 |");
        match &blocks[0] {
            Block::Table(table) => {
                assert_eq!(table.header.len(), 2);
                assert_eq!(table.rows[0].len(), 2);
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_table_ends_at_first_pipeless_line() {
        let blocks = parse("|A|\n|-|\n|1|\ndone");
        assert!(matches!(blocks[0], Block::Table(_)));
        assert!(matches!(blocks[1], Block::Paragraph(_)));
    }

    #[test]
    fn test_horizontal_rule_variants() {
        for text in ["---", "*****", "___", "  ----  "] {
            let blocks = parse(text);
            assert_eq!(blocks, vec![Block::HorizontalRule], "input {:?}", text);
        }
        // Mixed runs are not rules.
        assert!(matches!(parse("--**")[0], Block::Paragraph(_)));
    }

    #[test]
    fn test_template_without_close_becomes_paragraph() {
        let blocks = parse("{{infobox|Dangling\nnext line");
        assert_eq!(
            blocks,
            vec![Block::Paragraph(vec![InlineSpan::PlainText(
                "{{infobox|Dangling next line".to_string()
            )])]
        );
    }

    #[test]
    fn test_unrecognized_template_kept_literal() {
        let blocks = parse("{{navbox|something}}");
        assert_eq!(blocks, vec![Block::Literal("navbox|something".to_string())]);
    }
}
