//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,

    /// Site origin. Links pointing at any other host are treated as external.
    /// Empty means every absolute http(s) link is external.
    pub url: String,

    /// Directory holding the `.md` posts, relative to the base directory
    pub content_dir: String,

    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub markdown: MarkdownConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            url: String::new(),
            content_dir: "posts".to_string(),
            highlight: HighlightConfig::default(),
            markdown: MarkdownConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        // An empty file deserializes to unit, not a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Host part of `url`, lowercased and without port
    pub fn host(&self) -> Option<String> {
        crate::markdown::host_of(&self.url)
    }
}

/// Syntax highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    /// syntect theme used for the generated stylesheet
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// Markdown parser switches on top of the always-on GFM extensions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    pub smart_punctuation: bool,
    pub footnotes: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            smart_punctuation: false,
            footnotes: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "posts");
        assert!(config.url.is_empty());
        assert!(config.highlight.enable);
        assert!(!config.highlight.line_number);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
url: https://Blog.Example.com:8443/
content_dir: content/posts
highlight:
  theme: InspiredGitHub
  line_number: true
unknown_key: ignored
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.content_dir, "content/posts");
        assert_eq!(config.highlight.theme, "InspiredGitHub");
        assert!(config.highlight.line_number);
        assert!(config.highlight.enable);
        assert!(config.markdown.footnotes);
        assert_eq!(config.host().as_deref(), Some("blog.example.com"));
    }

    #[test]
    fn test_load_empty_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file).unwrap();
        let config = SiteConfig::load(file.path()).unwrap();
        assert_eq!(config.title, "Blog");
    }

    #[test]
    fn test_load_invalid_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "highlight: [unclosed").unwrap();
        assert!(SiteConfig::load(file.path()).is_err());
    }
}
