//! Link resolution capability for wikilink targets.

use std::collections::{HashMap, HashSet};

/// Answers whether an article exists and what its canonical id is.
///
/// Queried, never mutated, by the renderer. Implementations are expected to
/// be cheap synchronous lookups into the document index; the renderer treats
/// the answers as a consistent snapshot for the duration of one render call.
pub trait LinkResolver: Send + Sync {
    /// Returns true if an article with this title (or id) exists.
    fn exists(&self, title: &str) -> bool;

    /// Returns the canonical article id for a title. Titles that do not
    /// resolve map to a deterministic slug, so a "missing" link still
    /// navigates somewhere sensible (click to create).
    fn resolve(&self, title: &str) -> String;
}

/// Resolver with no backing index; every target is missing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullResolver;

impl LinkResolver for NullResolver {
    fn exists(&self, _title: &str) -> bool {
        false
    }

    fn resolve(&self, title: &str) -> String {
        slugify(title)
    }
}

/// In-memory title/id index.
///
/// Titles match case-insensitively; a target equal to an article id matches
/// directly.
#[derive(Debug, Default, Clone)]
pub struct InMemoryResolver {
    titles: HashMap<String, String>,
    ids: HashSet<String>,
}

impl InMemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an article under its display title and canonical id.
    pub fn insert(&mut self, title: &str, id: &str) {
        self.titles.insert(title.to_lowercase(), id.to_string());
        self.ids.insert(id.to_string());
    }
}

impl LinkResolver for InMemoryResolver {
    fn exists(&self, title: &str) -> bool {
        let key = title.to_lowercase();
        self.titles.contains_key(&key) || self.ids.contains(&key)
    }

    fn resolve(&self, title: &str) -> String {
        let key = title.to_lowercase();
        if let Some(id) = self.titles.get(&key) {
            return id.clone();
        }
        if self.ids.contains(&key) {
            return key;
        }
        slugify(title)
    }
}

/// Derives a deterministic URL-safe slug from an article title.
///
/// Lowercases, folds whitespace and underscores to single hyphens, and keeps
/// only ASCII alphanumerics, hyphens and CJK ideographs. Titles that reduce
/// to nothing map to `untitled` so the slug stays deterministic.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for ch in title.to_lowercase().chars() {
        let mapped = if ch.is_whitespace() || ch == '_' {
            Some('-')
        } else if ch.is_ascii_alphanumeric() || ch == '-' || ('\u{4e00}'..='\u{9fff}').contains(&ch)
        {
            Some(ch)
        } else {
            None
        };
        let Some(mapped) = mapped else { continue };
        if mapped == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(mapped);
    }
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug.to_string()
    }
}
