//! Markup transformation pipeline.
//!
//! Source text is parsed into a flat event tree with `pulldown-cmark`, handed
//! through a fixed, ordered list of [`Stage`]s, and serialized to HTML. The
//! pipeline keeps no state between calls: the same input always produces the
//! same output.

mod autolink;
mod headings;
mod math;

use pulldown_cmark::{Event, Options, Parser, TextMergeStream};

use crate::error::{BuildError, BuildStage};

pub use autolink::{Autolink, find_autolinks};

/// Default cap on source size accepted by [`Transformer::try_render`].
pub const DEFAULT_MAX_SOURCE_BYTES: usize = 8 * 1024 * 1024;

/// Default cap on container nesting accepted by [`Transformer::try_render`].
pub const DEFAULT_MAX_NESTING: usize = 256;

/// One tree-to-tree rewrite in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Turn bare `http(s)://` and `www.` URLs into links.
    Autolink,
    /// Give every heading a unique, URL-safe `id`.
    HeadingIds,
    /// Convert `$...$` / `$$...$$` spans into MathML.
    Math,
}

impl Stage {
    /// The stages used by [`Transformer::default`], in order.
    pub const STANDARD: [Stage; 3] = [Stage::Autolink, Stage::HeadingIds, Stage::Math];

    pub fn transform<'a>(&self, events: Vec<Event<'a>>) -> Vec<Event<'a>> {
        match self {
            Stage::Autolink => autolink::link_urls(events),
            Stage::HeadingIds => headings::assign_ids(events),
            Stage::Math => math::render_math(events),
        }
    }
}

/// Renders markdown source into an HTML fragment.
#[derive(Debug, Clone)]
pub struct Transformer {
    stages: Vec<Stage>,
    max_source_bytes: usize,
    max_nesting: usize,
}

impl Default for Transformer {
    fn default() -> Self {
        Self {
            stages: Stage::STANDARD.to_vec(),
            max_source_bytes: DEFAULT_MAX_SOURCE_BYTES,
            max_nesting: DEFAULT_MAX_NESTING,
        }
    }
}

impl Transformer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a transformer running exactly `stages`, in the given order.
    pub fn with_stages(stages: impl IntoIterator<Item = Stage>) -> Self {
        Self {
            stages: stages.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn max_source_bytes(mut self, limit: usize) -> Self {
        self.max_source_bytes = limit;
        self
    }

    pub fn max_nesting(mut self, limit: usize) -> Self {
        self.max_nesting = limit;
        self
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Render `source` for live preview.
    ///
    /// Never fails. Input the pipeline refuses to transform is shown as an
    /// escaped preformatted block instead.
    pub fn render(&self, source: &str) -> String {
        match self.try_render(source) {
            Ok(html) => html,
            Err(e) => {
                log::info!("{e}; showing source as plain text");
                format!("<pre>{}</pre>\n", escape_html(source))
            }
        }
    }

    /// Render `source`, failing when no markup can be produced for it.
    pub fn try_render(&self, source: &str) -> Result<String, BuildError> {
        if source.len() > self.max_source_bytes {
            return Err(BuildError {
                stage: BuildStage::Parse,
                message: format!(
                    "source is {} bytes, limit is {}",
                    source.len(),
                    self.max_source_bytes
                ),
            });
        }

        let mut events = parse(source);

        let depth = max_depth(&events);
        if depth > self.max_nesting {
            return Err(BuildError {
                stage: BuildStage::Transform,
                message: format!("nesting depth {depth} exceeds limit of {}", self.max_nesting),
            });
        }

        for stage in &self.stages {
            events = stage.transform(events);
        }

        Ok(serialize(events))
    }
}

/// Render `source` with the standard pipeline.
pub fn render(source: &str) -> String {
    Transformer::default().render(source)
}

/// Parser options: GFM tables, strikethrough and task lists, plus math.
fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_MATH);
    options
}

fn parse(source: &str) -> Vec<Event<'_>> {
    TextMergeStream::new(Parser::new_ext(source, options())).collect()
}

fn serialize(events: Vec<Event<'_>>) -> String {
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, events.into_iter());
    html
}

fn max_depth(events: &[Event<'_>]) -> usize {
    let mut depth = 0usize;
    let mut max = 0usize;
    for event in events {
        match event {
            Event::Start(_) => {
                depth += 1;
                max = max.max(depth);
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}

pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
