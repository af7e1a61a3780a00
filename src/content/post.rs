//! Post models

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use super::frontmatter::{parse_date_string, FrontMatter};

const DEFAULT_TITLE: &str = "untitled";
const DEFAULT_AUTHOR: &str = "unknown";

/// Post metadata with front-matter defaults applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostMetadata {
    pub title: String,

    /// Publication date as written in the front-matter (ISO 8601)
    pub date: String,

    pub author: String,
    pub tags: Vec<String>,
    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    pub published: bool,
}

impl PostMetadata {
    /// Apply defaults to raw front-matter. `now` fills in a missing date.
    pub fn from_front_matter(fm: FrontMatter, now: DateTime<Utc>) -> Self {
        Self {
            title: non_empty(fm.title).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            date: non_empty(fm.date)
                .unwrap_or_else(|| now.to_rfc3339_opts(SecondsFormat::Millis, true)),
            author: non_empty(fm.author).unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            tags: fm.tags,
            description: fm.description.unwrap_or_default(),
            image: fm.image,
            published: fm.published != Some(false),
        }
    }

    /// The parsed publication instant, if `date` is a recognized format
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_date_string(&self.date)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

impl From<FrontMatter> for PostMetadata {
    fn from(fm: FrontMatter) -> Self {
        Self::from_front_matter(fm, Utc::now())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// A blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    /// URL-facing identifier derived from the filename
    pub slug: String,

    #[serde(flatten)]
    pub meta: PostMetadata,

    /// Raw markdown body
    pub content: String,
}

impl Post {
    /// Drop the body, keeping what a listing needs
    pub fn preview(&self) -> PostPreview {
        PostPreview {
            slug: self.slug.clone(),
            meta: self.meta.clone(),
        }
    }
}

impl From<Post> for PostPreview {
    fn from(post: Post) -> Self {
        Self {
            slug: post.slug,
            meta: post.meta,
        }
    }
}

/// A post without its body, used for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostPreview {
    pub slug: String,

    #[serde(flatten)]
    pub meta: PostMetadata,
}
