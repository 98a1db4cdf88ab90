//! Wide sans-serif layout with accent-colored headings and card-style tables.

use crate::css::CssRule;

use super::Theme;

const DEFAULT_CONTENT: &str = r#"# Alex Rivera

Designer & developer building small, fast tools for the web.

## Work

1. ~~Agency work~~ Independent since 2022
2. Open-source contributor to several markdown tooling projects

## Stack

| Area     | Tools              |
|----------|--------------------|
| Design   | Figma, pen & paper |
| Frontend | TypeScript, CSS    |

## Writing

> Good typography is invisible.

Notes on layout, colour and the maths of spacing: $$\sum_{i=1}^{n} s_i = h$$

## Elsewhere

Find me at www.example.org or https://github.com/example.
"#;

const PREAMBLE: &str = "@import url('https://fonts.googleapis.com/css2?family=Inter:wght@400;600;800&display=swap');

html {
  margin: 0;
  padding: 0;
  background: #f4f5f7;
}

img {
  width: 100%;
  border-radius: 8px;
}";

const RESPONSIVE: &str = "
@media (max-width: 600px) {
  .page {
    margin: 0;
    border-radius: 0;
    padding: 1.5rem 1rem;
  }

  .page h1 {
    font-size: 2rem;
  }
}
";

fn rules() -> Vec<CssRule> {
    vec![
        CssRule::scope("font-family: 'Inter', system-ui, sans-serif;\n  color: #1f2933;\n  line-height: 1.7;"),
        CssRule::scope("background: #ffffff;\n  border-radius: 12px;\n  box-shadow: 0 10px 30px rgba(15, 23, 42, 0.08);"),
        CssRule::nested("h1", "font-size: 3rem;\n  font-weight: 800;\n  letter-spacing: -0.03em;\n  margin: 0 0 1rem;"),
        CssRule::nested("h2, h3, h4, h5, h6", "font-weight: 600;\n  color: #6d28d9;\n  margin: 2rem 0 0.5rem;"),
        CssRule::nested("h2", "font-size: 1.6rem;"),
        CssRule::nested("h3", "font-size: 1.3rem;"),
        CssRule::nested("a", "color: #6d28d9;\n  text-decoration-thickness: 2px;\n  text-underline-offset: 3px;"),
        CssRule::nested("blockquote", "margin: 1.5rem 0;\n  padding: 1rem 1.5rem;\n  background: #f5f3ff;\n  border-radius: 8px;\n  font-style: italic;"),
        CssRule::nested("code", "font-family: 'JetBrains Mono', Menlo, monospace;\n  font-size: 0.85em;\n  color: #be185d;"),
        CssRule::nested("table", "width: 100%;\n  border-collapse: separate;\n  border-spacing: 0;\n  border: 1px solid #e4e7eb;\n  border-radius: 8px;\n  overflow: hidden;"),
        CssRule::nested("th", "background: #f5f3ff;\n  text-align: left;"),
        CssRule::nested("th, td", "padding: 0.75rem 1rem;\n  border-bottom: 1px solid #e4e7eb;"),
        CssRule::nested("del", "color: #9aa5b1;"),
    ]
}

pub(super) fn theme() -> Theme {
    Theme::new("modern", "page")
        .with_label("Modern Theme")
        .with_default_content(DEFAULT_CONTENT)
        .with_preamble(PREAMBLE)
        .with_scope_declaration("max-width: 860px;\n  margin: 3rem auto;\n  padding: 3rem;\n  box-sizing: border-box;")
        .with_trailing(RESPONSIVE)
        .with_rules(rules())
}
