//! Parser modules for markdown-with-wiki-extensions rendering.

mod blocks;
mod infobox;
mod inline;

use crate::core::ast::DocumentAst;
use crate::render::{escape_html, HtmlRenderer, Renderer};
use crate::resolver::{LinkResolver, NullResolver};
use crate::Result;

pub use self::blocks::BlockParser;
pub use self::infobox::parse_infobox;
pub use self::inline::parse_inline;

/// Main renderer struct that orchestrates markdown-to-HTML conversion.
///
/// Rendering is a pure function of the input text and the resolver
/// snapshot: no I/O, no mutation, safe to call concurrently.
pub struct MarkdownToHtml<'a> {
    resolver: &'a dyn LinkResolver,
}

impl<'a> MarkdownToHtml<'a> {
    /// Creates a renderer resolving wikilinks through the given capability.
    pub fn new(resolver: &'a dyn LinkResolver) -> Self {
        Self { resolver }
    }

    /// Creates a renderer with no link index; every wikilink is missing.
    pub fn with_defaults() -> MarkdownToHtml<'static> {
        MarkdownToHtml {
            resolver: &NullResolver,
        }
    }

    /// Renders a markdown document to an HTML fragment.
    ///
    /// Never fails: malformed constructs degrade to the nearest sane
    /// interpretation, and a pathological document falls back to a single
    /// escaped paragraph.
    pub fn render(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        let normalized = normalize_newlines(text);
        match self.render_blocks(&normalized) {
            Ok(html) => html,
            Err(_) => format!("<p>{}</p>", escape_html(text)),
        }
    }

    fn render_blocks(&self, text: &str) -> Result<String> {
        let document = DocumentAst {
            blocks: BlockParser::parse(text)?,
        };
        HtmlRenderer::new(self.resolver).render(&document)
    }
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_renders_empty() {
        assert_eq!(MarkdownToHtml::with_defaults().render(""), "");
    }

    #[test]
    fn test_mixed_line_endings_normalized() {
        let html = MarkdownToHtml::with_defaults().render("a\r\nb\rc");
        assert_eq!(html, "<p>a b c</p>");
    }

    #[test]
    fn test_pathological_nesting_degrades_to_escaped_paragraph() {
        let input = format!("{} <deep>", ">".repeat(80));
        let html = MarkdownToHtml::with_defaults().render(&input);
        assert!(html.starts_with("<p>"));
        assert!(html.contains("&lt;deep&gt;"));
        assert!(!html.contains("<blockquote>"));
    }
}
