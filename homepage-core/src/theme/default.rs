use crate::css::CssRule;

use super::{DEFAULT_THEME_ID, Theme};

const DEFAULT_CONTENT: &str = r#"# Jane Doe

Software engineer working on compilers and developer tooling.

## Projects

- **Parsers**: incremental parsing for editors
- **Typesetting**: math such as $e^{i\pi} + 1 = 0$ rendered inline

## Contact

| Channel | Address               |
|---------|-----------------------|
| Email   | jane@example.com      |
| Web     | https://example.com   |
"#;

const PREAMBLE: &str = "html {
  margin: 0;
  padding: 0;
  font-size: 1rem;
}

body {
  margin: 0;
  background: #ffffff;
  color: #212529;
}

img {
  max-width: 100%;
}";

const RESPONSIVE: &str = "
@media (min-width: 768px) {
  .content {
    padding: 2rem 0;
  }
}
";

fn rules() -> Vec<CssRule> {
    vec![
        CssRule::scope(
            "font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;\n  line-height: 1.6;",
        ),
        CssRule::nested("h1, h2, h3, h4, h5, h6", "margin: 1.5rem 0 0.5rem;\n  font-weight: 600;\n  line-height: 1.25;"),
        CssRule::nested("h1", "font-size: 2.25rem;\n  margin-top: 0;"),
        CssRule::nested("h2", "font-size: 1.5rem;\n  border-bottom: 1px solid #e9ecef;\n  padding-bottom: 0.3rem;"),
        CssRule::nested("h3", "font-size: 1.25rem;"),
        CssRule::nested("a", "color: #0d6efd;\n  text-decoration: none;"),
        CssRule::nested("a:hover", "text-decoration: underline;"),
        CssRule::nested("code", "font-family: SFMono-Regular, Menlo, Consolas, monospace;\n  font-size: 0.875em;\n  background: #f6f8fa;\n  padding: 0.1em 0.3em;\n  border-radius: 3px;"),
        CssRule::nested("pre", "background: #f6f8fa;\n  padding: 1rem;\n  overflow-x: auto;"),
        CssRule::nested("pre code", "background: none;\n  padding: 0;"),
        CssRule::nested("blockquote", "margin: 1rem 0;\n  padding: 0 1rem;\n  color: #6c757d;\n  border-left: 4px solid #dee2e6;"),
        CssRule::nested("table", "width: 100%;\n  border-collapse: collapse;\n  margin: 1rem 0;"),
        CssRule::nested("th, td", "padding: 0.5rem;\n  border: 1px solid #dee2e6;\n  text-align: left;"),
        CssRule::nested(".math-display", "display: block;\n  margin: 1rem 0;\n  overflow-x: auto;"),
    ]
}

pub(super) fn theme() -> Theme {
    Theme::new(DEFAULT_THEME_ID, "content")
        .with_label("Default Theme")
        .with_default_content(DEFAULT_CONTENT)
        .with_preamble(PREAMBLE)
        .with_scope_declaration("max-width: 720px;\n  margin: 0 auto;\n  padding: 1rem;\n  box-sizing: border-box;")
        .with_trailing(RESPONSIVE)
        .with_rules(rules())
}
