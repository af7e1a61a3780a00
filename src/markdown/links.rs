//! External link rewriting

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::host_of;

const EXTERNAL_ATTRS: &str = r#"target="_blank" rel="noopener noreferrer""#;

lazy_static! {
    // Start tags as html5ever serializes them: every value double-quoted,
    // `"` inside values escaped, so `>` can only close the tag
    static ref ANCHOR_START: Regex = Regex::new(r#"<a((?: [^\s"'>/=]+="[^"]*")*)>"#).unwrap();
    static ref HREF: Regex = Regex::new(r#"(?:^| )href="([^"]*)""#).unwrap();
}

/// Opens links to other origins in a new browsing context, without handing
/// the opener or the referrer to the target page.
///
/// Works on sanitized HTML, so anchors from markdown syntax and from raw HTML
/// are treated alike. The sanitizer has already removed any `target` or `rel`
/// the source carried.
pub struct ExternalLinks {
    site_host: Option<String>,
}

impl ExternalLinks {
    /// `site_host` is the host of the site itself; None marks every absolute
    /// http(s) link as external.
    pub fn new(site_host: Option<String>) -> Self {
        Self { site_host }
    }

    pub fn is_external(&self, url: &str) -> bool {
        match host_of(url) {
            Some(host) => self.site_host.as_deref() != Some(host.as_str()),
            None => false,
        }
    }

    /// Add `target` and `rel` to every anchor whose `href` leaves the site
    pub fn decorate(&self, html: &str) -> String {
        ANCHOR_START
            .replace_all(html, |caps: &Captures| {
                let attrs = &caps[1];
                let external = HREF
                    .captures(attrs)
                    .map(|href| self.is_external(&href[1].replace("&amp;", "&")))
                    .unwrap_or(false);
                if external {
                    format!("<a{} {}>", attrs, EXTERNAL_ATTRS)
                } else {
                    caps[0].to_string()
                }
            })
            .into_owned()
    }
}
