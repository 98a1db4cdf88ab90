use pulldown_cmark::{Event, Tag, TagEnd};

use crate::slug::Slugger;

/// Set a unique `id` on every heading, derived from its text content.
pub(super) fn assign_ids<'a>(events: Vec<Event<'a>>) -> Vec<Event<'a>> {
    let mut slugger = Slugger::new();
    let mut out: Vec<Event<'a>> = Vec::with_capacity(events.len());
    // (index of the heading's Start event in `out`, accumulated text)
    let mut open: Option<(usize, String)> = None;

    for event in events {
        match &event {
            Event::Start(Tag::Heading { .. }) => {
                open = Some((out.len(), String::new()));
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((idx, text)) = open.take() {
                    let slug = slugger.slug(&text);
                    if let Event::Start(Tag::Heading { id, .. }) = &mut out[idx] {
                        *id = Some(slug.into());
                    }
                }
            }
            Event::Text(t) | Event::Code(t) | Event::InlineMath(t) | Event::DisplayMath(t) => {
                if let Some((_, buf)) = open.as_mut() {
                    buf.push_str(t);
                }
            }
            _ => {}
        }
        out.push(event);
    }

    out
}
