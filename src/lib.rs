//! mdpress: markdown blog content pipeline
//!
//! Two independent pieces make up the crate. [`content::PostRepository`]
//! reads posts (front-matter plus markdown body) from a directory and answers
//! listing and search queries. [`markdown::MarkdownRenderer`] turns a post
//! body into sanitized HTML. A presentation layer asks the repository for a
//! post and hands its body to the renderer; the two never talk to each other.

pub mod commands;
pub mod config;
pub mod content;
pub mod markdown;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// A blog rooted at a directory
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the posts
    pub content_dir: PathBuf,
}

impl Blog {
    /// Open a blog, reading `_config.yml` from `base_dir` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        // join keeps an absolute content_dir as-is
        let content_dir = base_dir.join(&config.content_dir);
        Self {
            config,
            base_dir,
            content_dir,
        }
    }

    /// Repository over the content directory
    pub fn posts(&self) -> content::PostRepository {
        content::PostRepository::new(&self.content_dir)
    }

    /// Renderer configured for this site
    pub fn renderer(&self) -> markdown::MarkdownRenderer {
        markdown::MarkdownRenderer::from_config(&self.config)
    }
}
