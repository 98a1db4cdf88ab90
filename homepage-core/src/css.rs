//! Scoped stylesheet composition.
//!
//! A theme describes its styles as an ordered list of [`CssRule`]s relative
//! to a scope element. [`compose`] nests them under the scope selector and
//! writes them out in list order, so the normal cascade applies: a later
//! rule for an overlapping selector wins over an earlier one.

use std::borrow::Cow;
use std::fmt::Write as _;

/// A declaration block, optionally targeting a selector inside the scope.
///
/// Without a selector the declarations apply to the scope element itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssRule {
    pub selector: Option<Cow<'static, str>>,
    pub declaration: Cow<'static, str>,
}

impl CssRule {
    /// Declarations applied directly to the scope element.
    pub fn scope(declaration: impl Into<Cow<'static, str>>) -> Self {
        Self {
            selector: None,
            declaration: declaration.into(),
        }
    }

    /// Declarations for elements matching `selector` inside the scope.
    pub fn nested(
        selector: impl Into<Cow<'static, str>>,
        declaration: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            selector: Some(selector.into()),
            declaration: declaration.into(),
        }
    }
}

/// Compose `rules` under `scope` into stylesheet text.
///
/// Output is one block for the scope itself (holding `scope_declaration`
/// followed by every selector-less rule), then one block per selector rule in
/// list order, then `trailing` verbatim. Rules are never merged, reordered or
/// deduplicated.
pub fn compose(
    rules: &[CssRule],
    scope: &str,
    scope_declaration: Option<&str>,
    trailing: Option<&str>,
) -> String {
    let mut css = String::new();

    let scope_decls: Vec<&str> = scope_declaration
        .into_iter()
        .chain(
            rules
                .iter()
                .filter(|r| r.selector.is_none())
                .map(|r| r.declaration.as_ref()),
        )
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .collect();

    if !scope_decls.is_empty() {
        write_block(&mut css, scope, &scope_decls.join("\n  "));
    }

    for rule in rules {
        if let Some(selector) = &rule.selector {
            let scoped = scope_selector(scope, selector);
            write_block(&mut css, &scoped, rule.declaration.trim());
        }
    }

    if let Some(raw) = trailing {
        css.push_str(raw);
    }

    css
}

fn write_block(css: &mut String, selector: &str, declaration: &str) {
    if !css.is_empty() {
        css.push('\n');
    }
    // Writing to a String cannot fail.
    let _ = writeln!(css, "{selector} {{\n  {declaration}\n}}");
}

/// Prefix each comma-separated part of `selector` with `scope`, unless that
/// part already starts at the scope element.
fn scope_selector(scope: &str, selector: &str) -> String {
    selector
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            if targets_scope(scope, part) {
                part.to_string()
            } else {
                format!("{scope} {part}")
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn targets_scope(scope: &str, part: &str) -> bool {
    match part.strip_prefix(scope) {
        Some(rest) => match rest.chars().next() {
            None => true,
            Some(c) => c.is_whitespace() || matches!(c, ':' | '.' | '[' | '>' | '+' | '~' | '#'),
        },
        None => false,
    }
}
