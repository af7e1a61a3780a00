//! Markdown rendering: markdown in, sanitized HTML out
//!
//! Rendering is a fixed pipeline. The parser produces a flat event list,
//! each [`Transform`] rewrites that list in order, the result is serialized
//! to HTML and then cleaned by the [`Sanitizer`]. Sanitizing is not a
//! transform: [`Pipeline::run`] always applies it last, so no stage can add
//! markup behind its back. The sanitizer also owns external link marking,
//! which covers raw HTML anchors as well as markdown links.

mod headings;
mod highlight;
mod links;
mod sanitize;

use anyhow::Result;
use pulldown_cmark::{html, Event, Options, Parser};

pub use headings::{HeadingIds, HeadingLinks};
pub use highlight::{stylesheet, Highlight};
pub use links::ExternalLinks;
pub use sanitize::{allow_list, Sanitizer};

use crate::config::SiteConfig;

/// One rewrite step over the parsed event list
pub trait Transform: Send + Sync {
    fn apply<'a>(&self, events: Vec<Event<'a>>) -> Vec<Event<'a>>;
}

/// Parse, transform, serialize, sanitize
pub struct Pipeline {
    options: Options,
    transforms: Vec<Box<dyn Transform>>,
    sanitizer: Sanitizer,
}

impl Pipeline {
    pub fn new(
        options: Options,
        transforms: Vec<Box<dyn Transform>>,
        sanitizer: Sanitizer,
    ) -> Self {
        Self {
            options,
            transforms,
            sanitizer,
        }
    }

    pub fn run(&self, markdown: &str) -> String {
        let mut events: Vec<Event> = Parser::new_ext(markdown, self.options).collect();
        for transform in &self.transforms {
            events = transform.apply(events);
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        // Must stay the final step
        self.sanitizer.clean(&html_output)
    }
}

/// Markdown renderer producing HTML that is safe to embed in a page
pub struct MarkdownRenderer {
    pipeline: Pipeline,
    theme_name: String,
}

impl MarkdownRenderer {
    /// Create a renderer with default settings
    pub fn new() -> Self {
        Self::from_config(&SiteConfig::default())
    }

    /// Create a renderer for a site. The site `url` decides which links
    /// count as external.
    pub fn from_config(config: &SiteConfig) -> Self {
        let mut options = Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_DEFINITION_LIST
            | Options::ENABLE_GFM;
        if config.markdown.footnotes {
            options |= Options::ENABLE_FOOTNOTES;
        }
        if config.markdown.smart_punctuation {
            options |= Options::ENABLE_SMART_PUNCTUATION;
        }

        let mut transforms: Vec<Box<dyn Transform>> =
            vec![Box::new(HeadingIds), Box::new(HeadingLinks)];
        if config.highlight.enable {
            transforms.push(Box::new(Highlight::new(config.highlight.line_number)));
        }

        Self {
            pipeline: Pipeline::new(options, transforms, Sanitizer::new(config.host())),
            theme_name: config.highlight.theme.clone(),
        }
    }

    /// Render markdown to sanitized HTML
    pub async fn render(&self, markdown: &str) -> String {
        self.render_sync(markdown)
    }

    /// Blocking form of [`render`](Self::render)
    pub fn render_sync(&self, markdown: &str) -> String {
        self.pipeline.run(markdown)
    }

    /// CSS for the classes emitted by code highlighting
    pub fn stylesheet(&self) -> Result<String> {
        stylesheet(&self.theme_name)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple HTML escaping
pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Lowercased host of an `http(s)://` or protocol-relative URL, port and
/// credentials removed. Anything else has no host.
pub(crate) fn host_of(url: &str) -> Option<String> {
    let url = url.trim();
    let rest = match url.strip_prefix("//") {
        Some(rest) => rest,
        None => {
            let (scheme, rest) = url.split_once("://")?;
            if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
                return None;
            }
            rest
        }
    };

    let authority = rest.split(['/', '?', '#']).next()?;
    let authority = authority.rsplit('@').next()?;
    let host = if authority.starts_with('[') {
        // IPv6 literal keeps its brackets
        authority.split_inclusive(']').next()?
    } else {
        authority.split(':').next()?
    };

    if host.is_empty() {
        None
    } else {
        Some(host.to_ascii_lowercase())
    }
}
