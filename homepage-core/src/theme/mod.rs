//! Themes and the theme registry.
//!
//! A [`Theme`] is an immutable description of a page template and a scoped
//! stylesheet. The [`ThemeRegistry`] is built once per session and shared by
//! reference; it never changes after construction.

mod classic;
mod default;
mod modern;

use crate::css::{CssRule, compose};
use crate::error::ThemeError;
use crate::transform::escape_html;
use crate::STYLESHEET_FILE;

/// Id of the theme used when a requested theme is unknown.
pub const DEFAULT_THEME_ID: &str = "default";

/// A named page template plus the rules its stylesheet is composed from.
#[derive(Debug, Clone)]
pub struct Theme {
    id: String,
    label: String,
    title: String,
    default_content: String,
    root_class: String,
    scope_declaration: Option<String>,
    preamble: String,
    trailing: Option<String>,
    head_links: Vec<String>,
    rules: Vec<CssRule>,
}

impl Theme {
    /// Start a theme whose content is wrapped in `<div class="{root_class}">`
    /// and whose rules are scoped under `.{root_class}`.
    pub fn new(id: impl Into<String>, root_class: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            title: "My Homepage".to_string(),
            id,
            default_content: String::new(),
            root_class: root_class.into(),
            scope_declaration: None,
            preamble: String::new(),
            trailing: None,
            head_links: Vec::new(),
            rules: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_default_content(mut self, content: impl Into<String>) -> Self {
        self.default_content = content.into();
        self
    }

    /// Base declarations for the scope element (layout and typography resets).
    pub fn with_scope_declaration(mut self, declaration: impl Into<String>) -> Self {
        self.scope_declaration = Some(declaration.into());
        self
    }

    /// Unscoped CSS emitted before the composed rules.
    pub fn with_preamble(mut self, css: impl Into<String>) -> Self {
        self.preamble = css.into();
        self
    }

    /// Hand-written CSS appended after the composed rules, untouched.
    pub fn with_trailing(mut self, css: impl Into<String>) -> Self {
        self.trailing = Some(css.into());
        self
    }

    /// Extra `<head>` markup, e.g. web font links.
    pub fn with_head_link(mut self, link: impl Into<String>) -> Self {
        self.head_links.push(link.into());
        self
    }

    pub fn with_rules(mut self, rules: Vec<CssRule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn default_content(&self) -> &str {
        &self.default_content
    }

    pub fn rules(&self) -> &[CssRule] {
        &self.rules
    }

    pub fn root_class(&self) -> &str {
        &self.root_class
    }

    /// The selector every rule is nested under.
    pub fn scope_selector(&self) -> String {
        format!(".{}", self.root_class)
    }

    /// Wrap a rendered body in the theme's page skeleton.
    pub fn generate_html(&self, body: &str) -> String {
        let mut head_extra = String::new();
        for link in &self.head_links {
            head_extra.push_str("\n  ");
            head_extra.push_str(link);
        }

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <link rel="stylesheet" href="{stylesheet}">{head_extra}
</head>
<body>
<div class="{root}">
{body}
</div>
</body>
</html>
"#,
            title = escape_html(&self.title),
            stylesheet = STYLESHEET_FILE,
            head_extra = head_extra,
            root = escape_html(&self.root_class),
            body = body.trim_end(),
        )
    }

    /// Produce the theme's complete stylesheet.
    pub fn generate_css(&self) -> String {
        let composed = compose(
            &self.rules,
            &self.scope_selector(),
            self.scope_declaration.as_deref(),
            self.trailing.as_deref(),
        );

        if self.preamble.is_empty() {
            composed
        } else {
            format!("{}\n\n{}", self.preamble.trim_end(), composed)
        }
    }
}

/// The fixed set of themes available to a session.
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes: Vec<Theme>,
    default_index: usize,
}

impl ThemeRegistry {
    /// Build a registry from `themes`. Ids must be unique and `default_id`
    /// must be one of them.
    pub fn new(themes: Vec<Theme>, default_id: &str) -> Result<Self, ThemeError> {
        for (i, theme) in themes.iter().enumerate() {
            if themes[..i].iter().any(|t| t.id == theme.id) {
                return Err(ThemeError::Duplicate(theme.id.clone()));
            }
        }

        let default_index = themes
            .iter()
            .position(|t| t.id == default_id)
            .ok_or_else(|| ThemeError::Unknown(default_id.to_string()))?;

        Ok(Self {
            themes,
            default_index,
        })
    }

    /// The built-in `classic`, `default` and `modern` themes.
    pub fn builtin() -> Self {
        Self {
            themes: vec![classic::theme(), default::theme(), modern::theme()],
            default_index: 1,
        }
    }

    pub fn resolve(&self, id: &str) -> Result<&Theme, ThemeError> {
        self.themes
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| ThemeError::Unknown(id.to_string()))
    }

    /// Resolve `id`, falling back to the default theme if it is unknown.
    pub fn resolve_or_default(&self, id: &str) -> &Theme {
        match self.resolve(id) {
            Ok(theme) => theme,
            Err(e) => {
                let fallback = self.default_theme();
                log::warn!("{e}; using '{}' theme", fallback.id);
                fallback
            }
        }
    }

    pub fn default_theme(&self) -> &Theme {
        &self.themes[self.default_index]
    }

    /// Theme ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.themes.iter().map(|t| t.id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Theme> {
        self.themes.iter()
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
