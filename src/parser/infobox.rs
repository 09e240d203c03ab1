//! Infobox template sub-parser.
//!
//! Grammar: `infobox|Title|<icon>|key=value|...`, pipe-separated. The third
//! field counts as an icon only when it carries no `=`; fields without `=`
//! after that point are skipped.

use crate::core::ast::Infobox;

/// Parses the inner text of a single-line `{{...}}` template.
///
/// Returns `None` when the head field is not `infobox` (case-insensitive);
/// the caller emits the raw template text literally in that case.
pub fn parse_infobox(raw: &str) -> Option<Infobox> {
    let parts: Vec<&str> = raw.split('|').collect();
    if !parts[0].trim().eq_ignore_ascii_case("infobox") {
        return None;
    }

    let title = parts
        .get(1)
        .map(|p| p.trim().to_string())
        .unwrap_or_default();
    let icon = parts
        .get(2)
        .filter(|p| !p.contains('='))
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(str::to_string);
    let field_start = if icon.is_some() { 3 } else { 2 };

    let mut rows = Vec::new();
    for field in parts.iter().skip(field_start) {
        let Some((key, value)) = field.split_once('=') else {
            continue;
        };
        rows.push((key.trim().to_string(), value.trim().to_string()));
    }

    Some(Infobox { title, icon, rows })
}
