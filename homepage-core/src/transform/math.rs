use std::fmt::Display;

use latex2mathml::{DisplayStyle, latex_to_mathml};
use pulldown_cmark::{CowStr, Event};

/// Marker latex2mathml embeds in its output for input it could not parse.
const PARSE_ERROR_MARKER: &str = "[PARSE ERROR";

/// Deepest `{` group handed to the converter, which parses groups recursively.
const MAX_GROUP_DEPTH: usize = 64;

/// MathML elements whose content is character data.
const TOKEN_ELEMENTS: [&str; 5] = ["mi", "mn", "mo", "ms", "mtext"];

/// Replace math spans with MathML presentation markup.
///
/// A span the converter rejects stays in the document as literal text,
/// delimiters included. Both inline and display math are wrapped in a
/// `<span>` so the result stays valid inside a paragraph.
pub(super) fn render_math<'a>(events: Vec<Event<'a>>) -> Vec<Event<'a>> {
    events
        .into_iter()
        .map(|event| match event {
            Event::InlineMath(src) => convert(src, DisplayStyle::Inline, latex_to_mathml),
            Event::DisplayMath(src) => convert(src, DisplayStyle::Block, latex_to_mathml),
            other => other,
        })
        .collect()
}

fn convert<'a, E, F>(src: CowStr<'a>, style: DisplayStyle, to_mathml: F) -> Event<'a>
where
    E: Display,
    F: Fn(&str, DisplayStyle) -> Result<String, E>,
{
    let (class, delim) = match style {
        DisplayStyle::Inline => ("math math-inline", "$"),
        DisplayStyle::Block => ("math math-display", "$$"),
    };

    let converted = if group_depth(&src) > MAX_GROUP_DEPTH {
        Err(format!("groups nested deeper than {MAX_GROUP_DEPTH}"))
    } else {
        to_mathml(&src, style)
            .map_err(|e| e.to_string())
            .and_then(|mathml| sanitize(&mathml))
    };

    match converted {
        Ok(mathml) => Event::InlineHtml(format!("<span class=\"{class}\">{mathml}</span>").into()),
        Err(e) => {
            log::info!("math span {delim}{src}{delim} left as text: {e}");
            Event::Text(format!("{delim}{src}{delim}").into())
        }
    }
}

fn group_depth(src: &str) -> usize {
    let mut depth = 0usize;
    let mut max = 0usize;
    for b in src.bytes() {
        match b {
            b'{' => {
                depth += 1;
                max = max.max(depth);
            }
            b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}

/// Check converter output and escape the character data of token elements.
///
/// Output carrying a parse-error node, or whose token elements do not close
/// where expected, is refused.
fn sanitize(mathml: &str) -> Result<String, String> {
    if let Some(at) = mathml.find(PARSE_ERROR_MARKER) {
        let detail = &mathml[at + 1..];
        let detail = detail.split(']').next().unwrap_or(detail);
        return Err(detail.to_string());
    }

    // latex2mathml closes sized parentheses with a misspelled tag.
    let mathml = mathml.replace("</mro>", "</mo>");

    let mut out = String::with_capacity(mathml.len());
    let mut rest = mathml.as_str();
    while let Some(open) = rest.find('<') {
        escape_text(&rest[..open], &mut out);
        rest = &rest[open..];
        let close = rest.find('>').ok_or("unterminated tag")?;
        let tag = &rest[..=close];
        out.push_str(tag);
        rest = &rest[close + 1..];

        if let Some(name) = token_element(tag) {
            let end = rest.find("</").unwrap_or(rest.len());
            escape_text(&rest[..end], &mut out);
            rest = &rest[end..];
            let closing = rest
                .strip_prefix("</")
                .and_then(|r| r.strip_prefix(name))
                .is_some_and(|r| r.starts_with('>'));
            if !closing {
                return Err(format!("<{name}> is not closed"));
            }
        }
    }
    escape_text(rest, &mut out);
    Ok(out)
}

/// The name of a token element opened by `tag`, if it is one.
fn token_element(tag: &str) -> Option<&'static str> {
    if tag.starts_with("</") || tag.ends_with("/>") {
        return None;
    }
    let name = tag[1..]
        .split(|c: char| c == ' ' || c == '>')
        .next()
        .unwrap_or_default();
    TOKEN_ELEMENTS.iter().copied().find(|t| *t == name)
}

fn escape_text(text: &str, out: &mut String) {
    for (i, c) in text.char_indices() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' if !starts_char_reference(&text[i..]) => out.push_str("&amp;"),
            c => out.push(c),
        }
    }
}

/// Whether `s` opens a numeric character reference such as `&#x2061;`.
fn starts_char_reference(s: &str) -> bool {
    let Some(body) = s.strip_prefix("&#") else {
        return false;
    };
    let digits = body.strip_prefix(['x', 'X']).unwrap_or(body);
    let len = digits.bytes().take_while(u8::is_ascii_hexdigit).count();
    len > 0 && digits[len..].starts_with(';')
}
