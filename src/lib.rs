//! # wikimark
//!
//! Markdown-with-wiki-extensions to HTML renderer.
//!
//! Handles headings, emphasis, links, wikilinks, lists, blockquotes,
//! inline and fenced code, tables, horizontal rules, images and infobox
//! templates. Wikilinks resolve against a [`LinkResolver`] capability so
//! the renderer stays independent of any storage backend.
//!
//! ## Example
//!
//! ```
//! use wikimark::{InMemoryResolver, MarkdownToHtml};
//!
//! let mut resolver = InMemoryResolver::new();
//! resolver.insert("Dragon", "dragon");
//!
//! let renderer = MarkdownToHtml::new(&resolver);
//! let html = renderer.render("# Bestiary\n\nSee [[Dragon]] for details.");
//! assert!(html.contains("<h1 id=\"bestiary\">Bestiary</h1>"));
//! assert!(html.contains("class=\"wiki-link\""));
//! ```

pub mod core;
pub mod error;
pub mod excerpt;
pub mod parser;
pub mod render;
pub mod resolver;

pub use error::{Error, Result};
pub use parser::MarkdownToHtml;
pub use resolver::{InMemoryResolver, LinkResolver, NullResolver};
