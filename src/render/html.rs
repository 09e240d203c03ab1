//! HTML renderer - serializes the block tree into an HTML fragment.
//!
//! Every piece of user text is escaped exactly once here; the parse tree
//! carries raw text only. Wikilink targets are resolved at this point, so
//! the same tree rendered against a different index gives different links.

use crate::core::ast::{Alignment, Block, DocumentAst, Infobox, InlineSpan, Table};
use crate::render::{escape_html, escape_html_attr, Renderer};
use crate::resolver::LinkResolver;
use crate::Result;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters `encodeURIComponent` leaves verbatim; everything else in an
/// article id gets percent-encoded.
const HREF_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const MISSING_LINK_HINT: &str = "This article does not exist yet";

pub struct HtmlRenderer<'a> {
    resolver: &'a dyn LinkResolver,
}

impl<'a> HtmlRenderer<'a> {
    pub fn new(resolver: &'a dyn LinkResolver) -> Self {
        Self { resolver }
    }

    fn render_blocks(&self, blocks: &[Block]) -> String {
        let fragments: Vec<String> = blocks.iter().map(|b| self.render_block(b)).collect();
        fragments.join("\n")
    }

    fn render_block(&self, block: &Block) -> String {
        match block {
            Block::Heading {
                level,
                anchor,
                content,
            } => format!(
                "<h{level} id=\"{}\">{}</h{level}>",
                escape_html_attr(anchor),
                self.render_spans(content)
            ),
            Block::Paragraph(spans) => format!("<p>{}</p>", self.render_spans(spans)),
            Block::UnorderedList(items) => format!("<ul>{}</ul>", self.render_items(items)),
            Block::OrderedList(items) => format!("<ol>{}</ol>", self.render_items(items)),
            Block::Blockquote(inner) => {
                format!("<blockquote>{}</blockquote>", self.render_blocks(inner))
            }
            Block::CodeBlock { language, code } => format!(
                "<pre><code class=\"lang-{}\">{}</code></pre>",
                escape_html_attr(language),
                escape_html(code)
            ),
            Block::Table(table) => self.render_table(table),
            Block::Infobox(infobox) => render_infobox(infobox),
            Block::HorizontalRule => "<hr>".to_string(),
            Block::Literal(text) => escape_html(text),
        }
    }

    fn render_items(&self, items: &[Vec<InlineSpan>]) -> String {
        items
            .iter()
            .map(|item| format!("<li>{}</li>", self.render_spans(item)))
            .collect()
    }

    fn render_table(&self, table: &Table) -> String {
        let alignment = |column: usize| {
            table
                .alignments
                .get(column)
                .copied()
                .unwrap_or(Alignment::Left)
                .as_css()
        };

        let headers: String = table
            .header
            .iter()
            .enumerate()
            .map(|(column, cell)| {
                format!(
                    "<th style=\"text-align:{}\">{}</th>",
                    alignment(column),
                    self.render_spans(cell)
                )
            })
            .collect();

        let body: String = table
            .rows
            .iter()
            .map(|row| {
                let cells: String = row
                    .iter()
                    .enumerate()
                    .map(|(column, cell)| {
                        format!(
                            "<td style=\"text-align:{}\">{}</td>",
                            alignment(column),
                            self.render_spans(cell)
                        )
                    })
                    .collect();
                format!("<tr>{}</tr>", cells)
            })
            .collect();

        format!(
            "<table><thead><tr>{}</tr></thead><tbody>{}</tbody></table>",
            headers, body
        )
    }

    fn render_spans(&self, spans: &[InlineSpan]) -> String {
        spans.iter().map(|span| self.render_span(span)).collect()
    }

    fn render_span(&self, span: &InlineSpan) -> String {
        match span {
            InlineSpan::PlainText(text) => escape_html(text),
            InlineSpan::Bold(children) => {
                format!("<strong>{}</strong>", self.render_spans(children))
            }
            InlineSpan::Italic(children) => format!("<em>{}</em>", self.render_spans(children)),
            InlineSpan::BoldItalic(children) => format!(
                "<strong><em>{}</em></strong>",
                self.render_spans(children)
            ),
            InlineSpan::Code(content) => format!("<code>{}</code>", escape_html(content)),
            InlineSpan::Image { alt, src } => format!(
                "<img src=\"{}\" alt=\"{}\" loading=\"lazy\">",
                escape_html_attr(src),
                escape_html_attr(alt)
            ),
            InlineSpan::Link { text, url } => format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>",
                escape_html_attr(url),
                self.render_spans(text)
            ),
            InlineSpan::WikiLink { target, label } => self.render_wikilink(target, label),
            InlineSpan::Strikethrough(children) => {
                format!("<del>{}</del>", self.render_spans(children))
            }
        }
    }

    fn render_wikilink(&self, target: &str, label: &str) -> String {
        let target = target.trim();
        let id = self.resolver.resolve(target);
        let href_id = utf8_percent_encode(&id, HREF_SET);
        if self.resolver.exists(target) {
            format!(
                "<a href=\"#/article/{}\" class=\"wiki-link\">{}</a>",
                href_id,
                escape_html(label)
            )
        } else {
            format!(
                "<a href=\"#/article/{}\" class=\"wiki-link-missing\" title=\"{}\">{}</a>",
                href_id,
                MISSING_LINK_HINT,
                escape_html(label)
            )
        }
    }
}

impl Renderer for HtmlRenderer<'_> {
    fn render(&self, document: &DocumentAst) -> Result<String> {
        Ok(self.render_blocks(&document.blocks))
    }
}

fn render_infobox(infobox: &Infobox) -> String {
    let rows: String = infobox
        .rows
        .iter()
        .map(|(key, value)| {
            format!(
                "<tr><th>{}</th><td>{}</td></tr>",
                escape_html(key),
                escape_html(value)
            )
        })
        .collect();

    let mut out = String::from("<div class=\"infobox\">\n");
    out.push_str(&format!(
        "  <div class=\"infobox-title\">{}</div>\n",
        escape_html(&infobox.title)
    ));
    if let Some(icon) = &infobox.icon {
        out.push_str(&format!(
            "  <div class=\"infobox-image\">{}</div>\n",
            escape_html(icon)
        ));
    }
    out.push_str(&format!("  <table>{}</table>\n</div>", rows));
    out
}
