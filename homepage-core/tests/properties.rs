//! Property-based tests using proptest.
//!
//! These tests verify that rendering never panics, is deterministic, keeps
//! malformed math literal, and always yields pairwise distinct heading ids.

use std::collections::HashSet;

use proptest::prelude::*;

fn heading_ids(html: &str) -> Vec<String> {
    html.match_indices(" id=\"")
        .map(|(i, m)| {
            let rest = &html[i + m.len()..];
            rest[..rest.find('"').unwrap()].to_string()
        })
        .collect()
}

proptest! {
    /// Random markdown-ish input, math delimiters included, should never
    /// cause a panic.
    #[test]
    fn any_markdown_no_panic(input in "\\PC{0,500}") {
        let html = homepage_core::render(&input);
        let _ = html.len();
    }

    /// Rendering the same input twice gives byte-identical output.
    #[test]
    fn render_is_deterministic(input in "[#A-Za-z0-9 *_|$\\\\{}^\n-]{0,300}") {
        prop_assert_eq!(homepage_core::render(&input), homepage_core::render(&input));
    }

    /// Malformed math is shown as written, never as a converter diagnostic.
    #[test]
    fn math_never_leaks_parse_errors(body in "[a-z0-9 +=<>&$\\\\{}^_]{1,40}") {
        let html = homepage_core::render(&format!("${body}$ and $${body}$$"));
        prop_assert!(!html.contains("PARSE ERROR"), "{}", html);
        prop_assert!(!html.contains("<mo><</mo>"), "{}", html);
    }

    /// Repeated heading texts still produce unique ids.
    #[test]
    fn heading_ids_unique(titles in prop::collection::vec("[A-Za-z ]{0,12}", 1..20)) {
        let src: String = titles.iter().map(|t| format!("## {t}\n\n")).collect();
        let ids = heading_ids(&homepage_core::render(&src));
        prop_assert_eq!(ids.len(), titles.len());
        let unique: HashSet<&String> = ids.iter().collect();
        prop_assert_eq!(unique.len(), ids.len());
    }

    /// Composed CSS keeps selector rules in input order.
    #[test]
    fn compose_preserves_order(selectors in prop::collection::vec("[a-z]{1,6}", 1..12)) {
        let rules: Vec<homepage_core::CssRule> = selectors
            .iter()
            .enumerate()
            .map(|(i, s)| homepage_core::CssRule::nested(s.clone(), format!("order: {i};")))
            .collect();
        let css = homepage_core::compose(&rules, ".w", None, None);
        let mut last = 0;
        for i in 0..rules.len() {
            let pos = css.find(&format!("order: {i};")).unwrap();
            prop_assert!(pos >= last);
            last = pos;
        }
    }
}
