//! `homepage-core`: turn a markdown document into a themed static site.
//!
//! The pipeline has three parts:
//!
//! - [`transform`] renders markdown (GFM tables, strikethrough, autolinks,
//!   `$`-delimited math) into an HTML fragment with stable heading ids.
//! - [`theme`] wraps that fragment in a page template and composes a scoped
//!   stylesheet from an ordered rule list (see [`css`]).
//! - [`bundler`] packages page, stylesheet and source into `homepage.zip`
//!   and hands it to a [`SaveTarget`](bundler::SaveTarget).
//!
//! # Quick start
//!
//! ```
//! let html = homepage_core::render("# Hi\n\n# Hi");
//! assert!(html.contains("id=\"hi-1\""));
//!
//! let themes = homepage_core::ThemeRegistry::builtin();
//! let page = themes.resolve_or_default("classic").generate_html(&html);
//! assert!(page.starts_with("<!DOCTYPE html>"));
//! ```

#[cfg(feature = "archive")]
pub mod bundle;
#[cfg(feature = "archive")]
pub mod bundler;
pub mod css;
pub mod error;
pub mod slug;
pub mod theme;
pub mod transform;

#[cfg(feature = "archive")]
pub use bundle::{Bundle, BundleFile};
#[cfg(feature = "archive")]
pub use bundler::{
    BuildState, BundleOptions, Bundler, DirectorySaver, DocumentSource, MemorySaver, SaveTarget,
};
pub use css::{CssRule, compose};
pub use error::*;
pub use theme::{DEFAULT_THEME_ID, Theme, ThemeRegistry};
pub use transform::{Stage, Transformer, render};

/// Name of the page file inside a bundle.
pub const INDEX_FILE: &str = "index.html";
/// Name of the stylesheet inside a bundle, linked from the page.
pub const STYLESHEET_FILE: &str = "stylesheet.css";
/// Name of the markdown source copy inside a bundle.
pub const SOURCE_FILE: &str = "sourcecode.md";
/// Fixed name of the downloadable archive.
pub const ARCHIVE_NAME: &str = "homepage.zip";
