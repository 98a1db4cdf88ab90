//! Serif resume layout with red section headings.

use crate::css::CssRule;

use super::Theme;

const DEFAULT_CONTENT: &str = r#"# Marius Hoffmann

## About Me

I have been a PhD student in mathematics at [Berkeley](https://math.berkeley.edu/) since August 2021. My advisor is [Prof. Hopkins](https://math.berkeley.edu/) and my main research interest is [tropical geometry](https://en.wikipedia.org/wiki/Tropical_geometry). Previously, I did my undergraduate at [Emory University](https://www.math.emory.edu/home/) (2017-2021).

You can email me at [marius.hoffman@fake.berkeley.edu](mailto:marius.hoffman@fake.berkeley.edu).

## Education

|   Major           | University        | Year          |
|-----------        | -------------     | ------------- |
| MSc Mathematics   | UC Berkeley       | since 2021    |
| BSc Mathematics   | Emory University  | 2017-2021     |

## Research

* [Some Invertibility Results for Parabolic Categories](https://thatsmathematics.com/mathgen/), 2021. With P. Wilson.
* [Uniqueness Methods In Representation Theory](https://thatsmathematics.com/mathgen/), 2020. With C. T. Li.
* [Integrability In Applied Representation Theory](https://thatsmathematics.com/mathgen/), 2020. With G. White.

## Essays

- [Spectral theorem of synthetic operators (pdf)](https://www.google.de)
- [Newton's matrix decomposition $SV_{\lambda}$](https://www.google.de)
- [Lindelöf-Locatelli Theorem (pdf)](https://www.google.de)
"#;

const PREAMBLE: &str = "html {
  margin: 0;
  padding: 0;
  display: flex;
  justify-content: center;
  font-size: 1.1rem;
}

img {
  width: 100%;
}";

const RESPONSIVE: &str = "
@media (min-width: 576px) {
  .wrapper {
    width: 500px;
  }
}

@media (min-width: 768px) {
  .wrapper {
    width: 640px;
  }
}
";

fn rules() -> Vec<CssRule> {
    vec![
        CssRule::scope("font-family: 'Lora', serif;\n  line-height: 1.5;"),
        CssRule::nested(
            "h1",
            "font-size: 2rem;\n  font-weight: 500;\n  line-height: 2;\n  margin: 0;\n  padding: 0;",
        ),
        CssRule::nested(
            "h2, h3, h4, h5, h6",
            "margin: 0;\n  padding: 0;\n  color: #a81010;\n  font-weight: 500;\n  line-height: 2;",
        ),
        CssRule::nested("h2", "font-size: 1.7rem;"),
        CssRule::nested("h3", "font-size: 1.5rem;"),
        CssRule::nested("h4", "font-size: 1.3rem;"),
        CssRule::nested("h5", "font-size: 1.2rem;"),
        CssRule::nested("h6", "font-size: 1.1rem;"),
        CssRule::nested("p", "font-size: 1rem;"),
        CssRule::nested(
            "code",
            "font-family: source-code-pro, Menlo, Monaco, Consolas, 'Courier New', monospace;\n  color: #d63384;\n  font-size: 0.875rem;\n  word-wrap: break-word;",
        ),
        CssRule::nested(
            "table",
            "border-color: grey;\n  border-spacing: 2px;\n  max-width: 100%;\n  width: 100%;\n  border-collapse: collapse;\n  margin: 2em 0;",
        ),
        CssRule::nested(
            "table th, table td",
            "padding: 0.75rem;\n  vertical-align: top;\n  border-top: 1px solid #dee2e6;",
        ),
    ]
}

pub(super) fn theme() -> Theme {
    Theme::new("classic", "wrapper")
        .with_label("Classic Theme")
        .with_title("My Resume")
        .with_default_content(DEFAULT_CONTENT)
        .with_preamble(PREAMBLE)
        .with_scope_declaration("margin-top: 1rem;\n  width: 100%;\n  padding: 1rem;\n  box-sizing: border-box;")
        .with_trailing(RESPONSIVE)
        .with_head_link(r#"<link rel="preconnect" href="https://fonts.googleapis.com">"#)
        .with_head_link(r#"<link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>"#)
        .with_head_link(
            r#"<link href="https://fonts.googleapis.com/css2?family=Lora:ital,wght@0,400;0,500;0,700;1,400;1,500;1,700&family=Marcellus+SC&display=swap" rel="stylesheet">"#,
        )
        .with_rules(rules())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_color_overridden_by_later_size_rules() {
        let css = theme().generate_css();
        let group = css.find(".wrapper h2, .wrapper h3, .wrapper h4").unwrap();
        let h2 = css.find(".wrapper h2 {").unwrap();
        assert!(group < h2);
    }

    #[test]
    fn media_queries_come_last() {
        let css = theme().generate_css();
        let last_rule = css.rfind(".wrapper table th, .wrapper table td {").unwrap();
        let media = css.find("@media (min-width: 576px)").unwrap();
        assert!(last_rule < media);
        assert!(css.starts_with("html {"));
    }
}
