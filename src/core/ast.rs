/// Parse tree for one document. Transient: built and rendered within a
/// single render call, never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentAst {
    pub blocks: Vec<Block>,
}

/// A block-level construct.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading {
        level: usize,
        /// Anchor id derived from the raw heading text, before inline parsing.
        anchor: String,
        content: Vec<InlineSpan>,
    },
    Paragraph(Vec<InlineSpan>),
    UnorderedList(Vec<Vec<InlineSpan>>),
    OrderedList(Vec<Vec<InlineSpan>>),
    Blockquote(Vec<Block>),
    CodeBlock {
        language: String,
        /// Verbatim content; escaped at render time, never inline-parsed.
        code: String,
    },
    Table(Table),
    Infobox(Infobox),
    HorizontalRule,
    /// A `{{...}}` template whose head field was not recognized; emitted as
    /// literal escaped text.
    Literal(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Per-column alignment from the separator row. Columns beyond this
    /// list default to left.
    pub alignments: Vec<Alignment>,
    pub header: Vec<Vec<InlineSpan>>,
    pub rows: Vec<Vec<Vec<InlineSpan>>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn as_css(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// A structured summary card embedded via `{{infobox|...}}` template syntax.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Infobox {
    pub title: String,
    pub icon: Option<String>,
    pub rows: Vec<(String, String)>,
}

/// An inline construct within one logical line. Emphasis, strikethrough and
/// link labels carry child spans; code and image payloads stay literal.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineSpan {
    PlainText(String),
    Bold(Vec<InlineSpan>),
    Italic(Vec<InlineSpan>),
    BoldItalic(Vec<InlineSpan>),
    Code(String),
    Image {
        alt: String,
        src: String,
    },
    Link {
        text: Vec<InlineSpan>,
        url: String,
    },
    WikiLink {
        /// Raw target; trimmed only when handed to the link resolver.
        target: String,
        label: String,
    },
    Strikethrough(Vec<InlineSpan>),
}
