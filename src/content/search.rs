//! Search filters over post previews

use super::PostPreview;

/// Filters applied by [`PostRepository::search`](super::PostRepository::search).
///
/// Both filters are optional and compose with AND. Within `tags` a post
/// needs any one of the requested tags; `text` matches title or description
/// case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    text: Option<String>,
    tags: Vec<String>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Substring to look for in title or description. Empty means no filter.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.text = if text.is_empty() {
            None
        } else {
            Some(text.to_lowercase())
        };
        self
    }

    /// Tags to filter by. Empty means no filter.
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// True when neither filter is active
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.tags.is_empty()
    }

    pub fn matches(&self, post: &PostPreview) -> bool {
        if !self.tags.is_empty() && !self.tags.iter().any(|tag| post.meta.has_tag(tag)) {
            return false;
        }

        match &self.text {
            Some(needle) => {
                post.meta.title.to_lowercase().contains(needle.as_str())
                    || post.meta.description.to_lowercase().contains(needle.as_str())
            }
            None => true,
        }
    }
}
