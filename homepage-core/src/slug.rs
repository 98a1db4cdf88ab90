//! Heading identifier generation.
//!
//! Identifiers are derived from heading text and made unique per document
//! with an incrementing numeric suffix, in the order headings are seen.

use std::collections::{HashMap, HashSet};

/// Identifier used when heading text contains no alphanumeric characters.
const EMPTY_SLUG: &str = "section";

/// Convert heading text into a URL-safe identifier.
///
/// Lower-cases the text, keeps alphanumeric characters, and collapses every
/// run of other characters into a single `-`. Leading and trailing
/// separators are dropped.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_sep = false;

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_sep = true;
        }
    }

    if slug.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        slug
    }
}

/// Assigns unique identifiers within a single document.
///
/// `counters` remembers the next suffix to try for each base slug, and
/// `assigned` holds every identifier handed out so far, so an explicit
/// heading such as `Intro 1` cannot clash with a generated `intro-1`.
#[derive(Debug, Default)]
pub struct Slugger {
    counters: HashMap<String, usize>,
    assigned: HashSet<String>,
}

impl Slugger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a unique identifier for `text`.
    pub fn slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        let mut n = self.counters.get(&base).copied().unwrap_or(0);

        let id = loop {
            let candidate = if n == 0 {
                base.clone()
            } else {
                format!("{base}-{n}")
            };
            n += 1;
            if !self.assigned.contains(&candidate) {
                break candidate;
            }
        };

        self.counters.insert(base, n);
        self.assigned.insert(id.clone());
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn slugify_lowercases_and_collapses() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  About   Me  "), "about-me");
        assert_eq!(slugify("C++ & Rust"), "c-rust");
    }

    #[test]
    fn slugify_keeps_unicode_letters() {
        assert_eq!(slugify("Über Café"), "über-café");
    }

    #[test]
    fn slugify_empty_falls_back() {
        assert_eq!(slugify("!!!"), "section");
        assert_eq!(slugify(""), "section");
    }

    #[test]
    fn duplicates_get_numeric_suffix() {
        let mut s = Slugger::new();
        assert_eq!(s.slug("Hi"), "hi");
        assert_eq!(s.slug("Hi"), "hi-1");
        assert_eq!(s.slug("hi"), "hi-2");
    }

    #[test]
    fn suffix_skips_existing_identifier() {
        let mut s = Slugger::new();
        assert_eq!(s.slug("Intro 1"), "intro-1");
        assert_eq!(s.slug("Intro"), "intro");
        assert_eq!(s.slug("Intro"), "intro-2");
        assert_eq!(s.slug("Intro 1"), "intro-1-1");
    }
}
