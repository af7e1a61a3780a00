//! Allow-list applied to rendered HTML

use ammonia::Builder;

use super::ExternalLinks;

const HEADINGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// ammonia's default allow-list, extended for what the pipeline emits.
///
/// Headings keep their `id`, highlighted code keeps its classes and task
/// list checkboxes survive as disabled inputs. Anchors never keep a `target`
/// or `rel` from the source. Everything else, including every non-inert URL
/// scheme, is whatever ammonia allows by default.
pub fn allow_list() -> Builder<'static> {
    let mut builder = Builder::default();
    builder
        .link_rel(None)
        .add_tag_attributes("a", &["class"])
        .add_tag_attributes("code", &["class"])
        .add_tag_attributes("pre", &["class"])
        .add_tag_attributes("span", &["class"])
        .add_tag_attributes("figure", &["class"])
        .add_tag_attributes("td", &["class"])
        .add_tag_attributes("sup", &["class", "id"])
        .add_tag_attributes("div", &["class", "id"])
        .add_tags(&["input"])
        .add_tag_attributes("input", &["checked"])
        .set_tag_attribute_value("input", "type", "checkbox")
        .set_tag_attribute_value("input", "disabled", "");
    for heading in HEADINGS {
        builder.add_tag_attributes(heading, &["id"]);
    }
    builder
}

/// Final pipeline stage: clean with [`allow_list`], then mark external
/// anchors. Only fixed `target`/`rel` values are added after cleaning.
pub struct Sanitizer {
    builder: Builder<'static>,
    links: ExternalLinks,
}

impl Sanitizer {
    pub fn new(site_host: Option<String>) -> Self {
        Self {
            builder: allow_list(),
            links: ExternalLinks::new(site_host),
        }
    }

    pub fn clean(&self, html: &str) -> String {
        let cleaned = self.builder.clean(html).to_string();
        self.links.decorate(&cleaned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(html: &str) -> String {
        Sanitizer::new(Some("blog.example.com".to_string())).clean(html)
    }

    #[test]
    fn test_raw_external_anchor_gets_noopener() {
        let html = clean(r#"<a href="https://evil.example/">plain</a>"#);
        assert_eq!(
            html,
            r#"<a href="https://evil.example/" target="_blank" rel="noopener noreferrer">plain</a>"#
        );
    }

    #[test]
    fn test_source_rel_and_target_are_replaced() {
        let html = clean(r#"<a href="https://evil.example/" target="_blank" rel="opener">tab</a>"#);
        assert!(!html.contains(r#"rel="opener""#));
        assert_eq!(html.matches("target=").count(), 1);
        assert!(html.contains(r#"rel="noopener noreferrer""#));
    }

    #[test]
    fn test_internal_anchor_loses_source_rel() {
        let html = clean(r##"<a href="#top" target="_self" rel="opener">top</a>"##);
        assert_eq!(html, r##"<a href="#top">top</a>"##);
    }

    #[test]
    fn test_strips_dangerous_schemes() {
        let html = clean(
            r#"<a href="javascript:alert(1)">x</a><img src="JaVaScRiPt:alert(2)"><a href="data:text/html,hi">d</a>"#,
        );
        assert!(!html.to_lowercase().contains("javascript:"));
        assert!(!html.contains("data:"));
        assert!(!html.contains("target="));
    }

    #[test]
    fn test_keeps_inert_schemes() {
        let html = clean(
            r#"<a href="https://a.org">a</a><a href="http://b.org">b</a><a href="mailto:me@c.org">c</a>"#,
        );
        assert!(html.contains(r#"href="https://a.org""#));
        assert!(html.contains(r#"href="http://b.org""#));
        assert!(html.contains(r#"<a href="mailto:me@c.org">c</a>"#));
    }

    #[test]
    fn test_removes_scripts_and_handlers() {
        let html = clean(r#"<p onclick="steal()">hi</p><script>alert(1)</script><style>p{}</style>"#);
        assert_eq!(html, "<p>hi</p>");
    }

    #[test]
    fn test_heading_ids_and_code_classes_survive() {
        let html = clean(
            r#"<h2 id="intro" class="x">Intro</h2><pre><code class="language-rust"><span class="source rust" style="color:red">fn</span></code></pre>"#,
        );
        assert!(html.contains(r#"<h2 id="intro">"#));
        assert!(html.contains(r#"<code class="language-rust">"#));
        assert!(html.contains(r#"<span class="source rust">"#));
        assert!(!html.contains("style"));
    }

    #[test]
    fn test_inputs_forced_to_disabled_checkboxes() {
        let html = clean(r#"<input type="text" name="pw" checked="">"#);
        assert!(html.contains(r#"type="checkbox""#));
        assert!(html.contains("disabled"));
        assert!(!html.contains("name="));
    }
}
