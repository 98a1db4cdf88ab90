//! WASM bindings for `homepage-core`.
//!
//! Exposes the live-preview half of the pipeline to a browser editor:
//! rendering markdown, and fetching theme pages and stylesheets. Archive
//! bundling stays on the native side.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use homepage_core::ThemeRegistry;

/// Render markdown source into an HTML fragment.
#[wasm_bindgen]
pub fn render(source: &str) -> String {
    homepage_core::render(source)
}

/// Render markdown source into a complete page for the given theme.
///
/// Unknown theme ids fall back to the default theme.
#[wasm_bindgen]
pub fn render_page(source: &str, theme_id: &str) -> String {
    let registry = ThemeRegistry::builtin();
    let theme = registry.resolve_or_default(theme_id);
    theme.generate_html(&homepage_core::render(source))
}

/// The stylesheet for a theme.
#[wasm_bindgen]
pub fn stylesheet(theme_id: &str) -> String {
    ThemeRegistry::builtin()
        .resolve_or_default(theme_id)
        .generate_css()
}

/// Starter document for a theme.
#[wasm_bindgen]
pub fn default_content(theme_id: &str) -> String {
    ThemeRegistry::builtin()
        .resolve_or_default(theme_id)
        .default_content()
        .to_string()
}

#[derive(Serialize)]
struct ThemeInfo<'a> {
    id: &'a str,
    label: &'a str,
    default: bool,
}

/// All theme ids with their labels, as `[{ id, label, default }]`.
#[wasm_bindgen]
pub fn themes() -> Result<JsValue, JsValue> {
    let registry = ThemeRegistry::builtin();
    let default_id = registry.default_theme().id();
    let infos: Vec<ThemeInfo<'_>> = registry
        .iter()
        .map(|t| ThemeInfo {
            id: t.id(),
            label: t.label(),
            default: t.id() == default_id,
        })
        .collect();
    serde_wasm_bindgen::to_value(&infos).map_err(JsValue::from)
}

/// Theme ids as a JSON array string.
#[wasm_bindgen]
pub fn theme_ids() -> String {
    let registry = ThemeRegistry::builtin();
    let ids: Vec<&str> = registry.ids().collect();
    serde_json::to_string(&ids).unwrap_or_else(|_| "[]".to_string())
}
