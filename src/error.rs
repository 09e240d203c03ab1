//! Error types for wikimark.

use thiserror::Error;

/// Result type for wikimark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while parsing a document.
///
/// These never cross the public render boundary:
/// [`MarkdownToHtml::render`](crate::MarkdownToHtml::render) catches them and
/// degrades the whole input to a single escaped paragraph.
#[derive(Error, Debug)]
pub enum Error {
    /// Block structure nested deeper than the parser supports.
    #[error("Nesting too deep: {0} levels")]
    NestingLimit(usize),
}
