//! Plain-text excerpting for search snippets.
//!
//! Strips the same template/wikilink/emphasis syntax the renderer
//! recognizes, so stripped text and rendered text stay consistent.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static TEMPLATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{[^}]+\}\}").unwrap());
static WIKILINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[([^\]|]+)(?:\|([^\]]+))?\]\]").unwrap());
static EXTERNAL_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap());
static MARKER_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[*_`#>~]").unwrap());
static NEWLINE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").unwrap());

/// Reduces markup to plain text: templates vanish, wikilinks keep their
/// display text, external links keep their label, marker characters are
/// dropped and newline runs collapse to single spaces.
pub fn strip_markup(text: &str) -> String {
    let stripped = TEMPLATE.replace_all(text, "");
    let stripped = WIKILINK.replace_all(&stripped, |caps: &Captures<'_>| {
        caps.get(2)
            .or_else(|| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    });
    let stripped = MARKER_CHARS.replace_all(&stripped, "");
    let stripped = EXTERNAL_LINK.replace_all(&stripped, "$1");
    let stripped = NEWLINE_RUN.replace_all(&stripped, " ");
    stripped.trim().to_string()
}

/// Returns up to `max_len` characters of stripped text, with a trailing
/// ellipsis when truncated.
pub fn excerpt(text: &str, max_len: usize) -> String {
    let plain = strip_markup(text);
    if plain.chars().count() <= max_len {
        return plain;
    }
    let mut snippet: String = plain.chars().take(max_len).collect();
    snippet.push('…');
    snippet
}
