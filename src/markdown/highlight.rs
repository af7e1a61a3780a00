//! Syntax highlighting for fenced code blocks

use anyhow::{anyhow, Result};
use pulldown_cmark::{CodeBlockKind, CowStr, Event, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use super::{escape_html, Transform};

/// Class style shared by the highlighter and the stylesheet
const CLASS_STYLE: ClassStyle = ClassStyle::Spaced;

/// Replaces fenced code blocks that name a language with highlighted HTML.
///
/// Output uses CSS classes rather than inline styles; pair it with
/// [`stylesheet`]. Unknown languages fall back to plain text, and blocks
/// without a language are left for the default renderer.
pub struct Highlight {
    syntax_set: SyntaxSet,
    line_numbers: bool,
}

impl Highlight {
    pub fn new(line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            line_numbers,
        }
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, CLASS_STYLE);
        for line in LinesWithEndings::from(code) {
            if let Err(e) = generator.parse_html_for_line_which_includes_newline(line) {
                tracing::debug!("Highlighting {} failed, using plain text: {}", lang, e);
                return self.wrap(&escape_html(code), code, lang);
            }
        }

        self.wrap(&generator.finalize(), code, lang)
    }

    fn wrap(&self, code_html: &str, code: &str, lang: &str) -> String {
        let lang = escape_html(lang);
        if self.line_numbers {
            add_line_numbers(code_html, code.lines().count().max(1), &lang)
        } else {
            format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang, code_html
            )
        }
    }
}

impl Transform for Highlight {
    fn apply<'a>(&self, events: Vec<Event<'a>>) -> Vec<Event<'a>> {
        let mut out = Vec::with_capacity(events.len());
        // Some while buffering a fenced block that names a language
        let mut block: Option<(String, String)> = None;

        for event in events {
            match event {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(ref info)))
                    if language(info).is_some() =>
                {
                    let lang = language(info).unwrap_or_default().to_string();
                    block = Some((lang, String::new()));
                }
                Event::Text(ref text) if block.is_some() => {
                    if let Some((_, code)) = block.as_mut() {
                        code.push_str(text);
                    }
                }
                Event::End(TagEnd::CodeBlock) => match block.take() {
                    Some((lang, code)) => {
                        out.push(Event::Html(CowStr::from(self.highlight_code(&code, &lang))));
                    }
                    None => out.push(event),
                },
                _ => out.push(event),
            }
        }

        out
    }
}

/// First word of a fence info string: "rust,ignore" and "rust title=x" are both rust
fn language(info: &str) -> Option<&str> {
    info.split(|c: char| c.is_whitespace() || c == ',' || c == '{')
        .next()
        .filter(|lang| !lang.is_empty())
}

/// Lay out highlighted code next to a line number gutter
fn add_line_numbers(code: &str, line_count: usize, lang: &str) -> String {
    let gutter = (1..=line_count)
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre>{}</pre></td></tr></table></figure>"#,
        lang, gutter, code
    )
}

/// CSS matching the highlighter's classes for a bundled syntect theme
pub fn stylesheet(theme_name: &str) -> Result<String> {
    let theme_set = ThemeSet::load_defaults();
    let theme = theme_set
        .themes
        .get(theme_name)
        .ok_or_else(|| anyhow!("Unknown highlight theme: {}", theme_name))?;
    Ok(css_for_theme_with_class_style(theme, CLASS_STYLE)?)
}
