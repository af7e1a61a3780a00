//! Heading anchors: stable ids and self-links

use lazy_static::lazy_static;
use pulldown_cmark::{CowStr, Event, LinkType, Tag, TagEnd};
use regex::Regex;
use std::collections::HashSet;

use super::{escape_html, Transform};

/// Id used when a heading has no text to derive one from
const FALLBACK_ID: &str = "heading";

lazy_static! {
    static ref RAW_ID: Regex =
        Regex::new(r#"(?i)\sid\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#).unwrap();
}

/// Gives every heading a unique `id` derived from its text.
///
/// Ids already present in the document are reserved first, so generated ids
/// never collide with them: explicit `{#id}` attributes, `id`s written in raw
/// HTML and footnote labels. Repeats get `-1`, `-2`, ... appended.
pub struct HeadingIds;

impl Transform for HeadingIds {
    fn apply<'a>(&self, mut events: Vec<Event<'a>>) -> Vec<Event<'a>> {
        let mut used = reserved_ids(&events);

        for i in 0..events.len() {
            if !matches!(events[i], Event::Start(Tag::Heading { id: None, .. })) {
                continue;
            }

            let base = slug::slugify(heading_text(&events[i + 1..]));
            let base = if base.is_empty() {
                FALLBACK_ID.to_string()
            } else {
                base
            };
            let unique = claim(base, &mut used);

            if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
                *id = Some(CowStr::from(unique));
            }
        }

        events
    }
}

fn reserved_ids(events: &[Event<'_>]) -> HashSet<String> {
    let mut used = HashSet::new();
    for event in events {
        match event {
            Event::Start(Tag::Heading { id: Some(id), .. }) => {
                used.insert(id.to_string());
            }
            Event::Start(Tag::FootnoteDefinition(label)) => {
                used.insert(label.to_string());
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                for caps in RAW_ID.captures_iter(html) {
                    if let Some(id) = caps.get(1).or(caps.get(2)).or(caps.get(3)) {
                        used.insert(id.as_str().to_string());
                    }
                }
            }
            _ => {}
        }
    }
    used
}

/// Plain text of a heading, given the events that follow its start tag
fn heading_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }
    text
}

fn claim(base: String, used: &mut HashSet<String>) -> String {
    let mut candidate = base.clone();
    let mut n = 1;
    while used.contains(&candidate) {
        candidate = format!("{}-{}", base, n);
        n += 1;
    }
    used.insert(candidate.clone());
    candidate
}

/// Turns each heading with an id into a link to itself.
///
/// The heading content is wrapped in `<a href="#id">`. Headings that already
/// contain a link get a separate `#` anchor in front instead, since anchors
/// cannot nest.
pub struct HeadingLinks;

impl Transform for HeadingLinks {
    fn apply<'a>(&self, events: Vec<Event<'a>>) -> Vec<Event<'a>> {
        let mut out = Vec::with_capacity(events.len());
        // Some(wrapped) while inside a heading
        let mut open: Option<bool> = None;

        for (i, event) in events.iter().enumerate() {
            match event {
                Event::Start(Tag::Heading { id: Some(id), .. }) => {
                    let href = format!("#{}", id);
                    out.push(event.clone());
                    if contains_link(&events[i + 1..]) {
                        out.push(Event::InlineHtml(CowStr::from(format!(
                            r##"<a class="heading-anchor" href="{}">#</a>"##,
                            escape_html(&href)
                        ))));
                        open = Some(false);
                    } else {
                        out.push(Event::Start(Tag::Link {
                            link_type: LinkType::Inline,
                            dest_url: CowStr::from(href),
                            title: CowStr::Borrowed(""),
                            id: CowStr::Borrowed(""),
                        }));
                        open = Some(true);
                    }
                }
                Event::End(TagEnd::Heading(_)) => {
                    if open.take() == Some(true) {
                        out.push(Event::End(TagEnd::Link));
                    }
                    out.push(event.clone());
                }
                _ => out.push(event.clone()),
            }
        }

        out
    }
}

fn contains_link(events: &[Event<'_>]) -> bool {
    events
        .iter()
        .take_while(|event| !matches!(event, Event::End(TagEnd::Heading(_))))
        .any(|event| matches!(event, Event::Start(Tag::Link { .. })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::tests::{events, to_html};

    #[test]
    fn test_ids_from_text() {
        let html = to_html(HeadingIds.apply(events("# Hello World\n\n## Use `cargo` now!")));
        assert!(html.contains(r#"<h1 id="hello-world">Hello World</h1>"#));
        assert!(html.contains(r#"<h2 id="use-cargo-now">"#));
    }

    #[test]
    fn test_duplicate_ids_get_suffix() {
        let html = to_html(HeadingIds.apply(events("# Intro\n\n# Intro\n\n## Intro")));
        assert!(html.contains(r#"id="intro""#));
        assert!(html.contains(r#"id="intro-1""#));
        assert!(html.contains(r#"id="intro-2""#));
    }

    #[test]
    fn test_explicit_id_is_reserved() {
        let html = to_html(HeadingIds.apply(events("# Setup\n\n# Other {#setup}")));
        assert!(html.contains(r#"<h1 id="setup-1">Setup</h1>"#));
        assert!(html.contains(r#"<h1 id="setup">Other</h1>"#));
    }

    #[test]
    fn test_raw_html_ids_are_reserved() {
        let html = to_html(HeadingIds.apply(events(
            "<h2 id=\"intro\">Raw</h2>\n\n## Intro\n\n<div ID='notes'></div>\n\n## Notes\n",
        )));
        assert_eq!(html.matches(r#"id="intro""#).count(), 1);
        assert!(html.contains(r#"<h2 id="intro-1">Intro</h2>"#));
        assert!(html.contains(r#"<h2 id="notes-1">Notes</h2>"#));
    }

    #[test]
    fn test_footnote_labels_are_reserved() {
        let options = pulldown_cmark::Options::ENABLE_FOOTNOTES;
        let evs: Vec<Event> =
            pulldown_cmark::Parser::new_ext("# Note\n\nText[^note]\n\n[^note]: Detail\n", options)
                .collect();
        let html = to_html(HeadingIds.apply(evs));
        assert!(html.contains(r#"<h1 id="note-1">Note</h1>"#));
        assert!(html.contains(r#"id="note""#));
    }

    #[test]
    fn test_textless_heading_gets_fallback() {
        let html = to_html(HeadingIds.apply(events("# !!!\n\n# ???")));
        assert!(html.contains(r#"id="heading""#));
        assert!(html.contains(r#"id="heading-1""#));
    }

    #[test]
    fn test_self_link_wraps_content() {
        let evs = HeadingLinks.apply(HeadingIds.apply(events("## Getting Started")));
        let html = to_html(evs);
        assert!(html.contains(
            r##"<h2 id="getting-started"><a href="#getting-started">Getting Started</a></h2>"##
        ));
    }

    #[test]
    fn test_heading_with_link_gets_separate_anchor() {
        let evs = HeadingLinks.apply(HeadingIds.apply(events("## See [docs](/docs)")));
        let html = to_html(evs);
        assert!(html.contains(r##"<a class="heading-anchor" href="#see-docs">#</a>"##));
        assert!(html.contains(r#"<a href="/docs">docs</a>"#));
        assert_eq!(html.matches("<a ").count(), 2);
    }

    #[test]
    fn test_headings_without_id_untouched() {
        let evs = HeadingLinks.apply(events("# Plain"));
        assert_eq!(to_html(evs), "<h1>Plain</h1>\n");
    }
}
