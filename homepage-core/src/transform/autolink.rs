//! Bare URL scanner.
//!
//! Detects `http://`, `https://` and `www.` URLs in plain text and turns them
//! into links, following the GFM autolink-literal rules closely enough for
//! prose: the host needs at least one `.`, and trailing punctuation or an
//! unbalanced `)` is left outside the link.

use pulldown_cmark::{Event, LinkType, Tag, TagEnd};

const PREFIXES: [&str; 3] = ["https://", "http://", "www."];

/// A URL found in text, as a byte range plus the `href` it links to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Autolink {
    pub start: usize,
    pub end: usize,
    pub href: String,
}

pub(super) fn link_urls<'a>(events: Vec<Event<'a>>) -> Vec<Event<'a>> {
    let mut out = Vec::with_capacity(events.len());
    // Depth of constructs whose text must not be linked.
    let mut suppressed = 0usize;

    for event in events {
        match &event {
            Event::Start(Tag::Link { .. } | Tag::Image { .. } | Tag::CodeBlock(_) | Tag::HtmlBlock) => {
                suppressed += 1;
            }
            Event::End(TagEnd::Link | TagEnd::Image | TagEnd::CodeBlock | TagEnd::HtmlBlock) => {
                suppressed = suppressed.saturating_sub(1);
            }
            Event::Text(text) if suppressed == 0 => {
                let links = find_autolinks(text);
                if !links.is_empty() {
                    let mut pos = 0;
                    for link in links {
                        if link.start > pos {
                            out.push(Event::Text(text[pos..link.start].to_string().into()));
                        }
                        out.push(Event::Start(Tag::Link {
                            link_type: LinkType::Autolink,
                            dest_url: link.href.into(),
                            title: "".into(),
                            id: "".into(),
                        }));
                        out.push(Event::Text(text[link.start..link.end].to_string().into()));
                        out.push(Event::End(TagEnd::Link));
                        pos = link.end;
                    }
                    if pos < text.len() {
                        out.push(Event::Text(text[pos..].to_string().into()));
                    }
                    continue;
                }
            }
            _ => {}
        }
        out.push(event);
    }

    out
}

/// Scan `text` for bare URLs.
///
/// Runs in time linear in `text.len()`: once a candidate fails, the rest of
/// its whitespace-delimited run is skipped.
pub fn find_autolinks(text: &str) -> Vec<Autolink> {
    let bytes = text.as_bytes();
    let mut results = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let at_boundary = pos == 0 || matches!(bytes[pos - 1], b' ' | b'\t' | b'\n' | b'*' | b'_' | b'~' | b'(');
        if at_boundary {
            if let Some(prefix) = PREFIXES.iter().find(|p| bytes[pos..].starts_with(p.as_bytes())) {
                let run_end = run_end(bytes, pos);
                match url_end(text, pos, run_end, prefix.len()) {
                    Some(end) => {
                        let url = &text[pos..end];
                        let href = if *prefix == "www." {
                            format!("http://{url}")
                        } else {
                            url.to_string()
                        };
                        results.push(Autolink { start: pos, end, href });
                        pos = end;
                    }
                    None => pos = run_end,
                }
                continue;
            }
        }
        pos += 1;
    }

    results
}

/// End of the run of URL-eligible bytes starting at `start`.
fn run_end(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|b| b.is_ascii_whitespace() || *b == b'<')
        .map_or(bytes.len(), |i| start + i)
}

/// Find where a URL spanning at most `start..run_end` ends, or `None` if the
/// host is not a plausible domain.
fn url_end(text: &str, start: usize, run_end: usize, prefix_len: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut end = run_end;

    // Trim trailing punctuation and unbalanced closing parens.
    let span = &bytes[start..end];
    let open = span.iter().filter(|&&b| b == b'(').count();
    let mut close = span.iter().filter(|&&b| b == b')').count();
    while end > start {
        match bytes[end - 1] {
            b'?' | b'!' | b'.' | b',' | b':' | b'*' | b'_' | b'~' | b'\'' | b'"' => end -= 1,
            b')' if close > open => {
                close -= 1;
                end -= 1;
            }
            _ => break,
        }
    }

    let host_start = if text[start..].starts_with("www.") {
        start
    } else {
        start + prefix_len
    };
    if host_start >= end {
        return None;
    }

    let host_end = bytes[host_start..end]
        .iter()
        .position(|b| matches!(b, b'/' | b'?' | b'#' | b':'))
        .map_or(end, |i| host_start + i);
    let host = &text[host_start..host_end];

    let valid = !host.is_empty()
        && host.contains('.')
        && host.split('.').all(|seg| !seg.is_empty())
        && host
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'));

    valid.then_some(end)
}
