//! Post repository - reads posts from the content directory
//!
//! Nothing is cached: every query rescans the directory, so results always
//! reflect what is on disk at call time.

use chrono::Utc;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use super::frontmatter::{FrontMatter, FrontMatterError};
use super::slug::slug_from_path;
use super::{Post, PostMetadata, PostPreview, SearchQuery};

/// Errors raised while reading posts
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("{path:?} is not valid UTF-8")]
    InvalidUtf8 { path: PathBuf },

    #[error("malformed front-matter in {path:?}: {source}")]
    FrontMatter {
        path: PathBuf,
        source: FrontMatterError,
    },
}

/// A markdown file found in the content directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFile {
    pub path: PathBuf,
    pub slug: String,
}

/// Read-only view over a flat directory of markdown posts
#[derive(Debug, Clone)]
pub struct PostRepository {
    dir: PathBuf,
}

impl PostRepository {
    /// Create a repository over `dir`. The directory does not need to exist.
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Enumerate `.md` files (non-recursive) in directory order.
    /// A missing directory yields no files.
    pub fn files(&self) -> Result<Vec<PostFile>, ContentError> {
        match fs::metadata(&self.dir) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(ContentError::Io {
                    path: self.dir.clone(),
                    source: io::Error::other("not a directory"),
                })
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("Content directory {:?} does not exist", self.dir);
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(ContentError::Io {
                    path: self.dir.clone(),
                    source: e,
                })
            }
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry in {:?}: {}", self.dir, e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(slug) = slug_from_path(entry.path()) {
                files.push(PostFile {
                    path: entry.into_path(),
                    slug,
                });
            }
        }

        tracing::debug!("Found {} posts in {:?}", files.len(), self.dir);
        Ok(files)
    }

    /// Slugs of every markdown file, published or not, in directory order
    pub fn list_slugs(&self) -> Result<Vec<String>, ContentError> {
        Ok(self.files()?.into_iter().map(|f| f.slug).collect())
    }

    /// Read and parse a single file
    pub fn load(&self, file: &PostFile) -> Result<Post, ContentError> {
        let bytes = fs::read(&file.path).map_err(|source| ContentError::Io {
            path: file.path.clone(),
            source,
        })?;
        let content = String::from_utf8(bytes).map_err(|_| ContentError::InvalidUtf8 {
            path: file.path.clone(),
        })?;

        let (fm, body) = FrontMatter::parse(&content).map_err(|source| {
            ContentError::FrontMatter {
                path: file.path.clone(),
                source,
            }
        })?;

        Ok(Post {
            slug: file.slug.clone(),
            meta: PostMetadata::from_front_matter(fm, Utc::now()),
            content: body.to_string(),
        })
    }

    /// Find the first published post whose filename yields `slug`
    pub fn get_by_slug(&self, slug: &str) -> Result<Option<Post>, ContentError> {
        let Some(file) = self.files()?.into_iter().find(|f| f.slug == slug) else {
            return Ok(None);
        };

        match self.load(&file) {
            Ok(post) if post.meta.published => Ok(Some(post)),
            Ok(_) => {
                tracing::debug!("Post {:?} is unpublished", slug);
                Ok(None)
            }
            Err(e) => {
                tracing::warn!("Failed to load post {:?}: {}", slug, e);
                Ok(None)
            }
        }
    }

    /// Every published post, newest first
    pub fn list_all(&self) -> Result<Vec<PostPreview>, ContentError> {
        let mut posts: Vec<PostPreview> = self
            .files()?
            .iter()
            .filter_map(|file| match self.load(file) {
                Ok(post) => Some(post),
                Err(e) => {
                    tracing::warn!("Skipping {:?}: {}", file.path, e);
                    None
                }
            })
            .filter(|post| post.meta.published)
            .map(PostPreview::from)
            .collect();

        posts.sort_by(newest_first);
        Ok(posts)
    }

    /// Published posts matching `query`, newest first
    pub fn search(&self, query: &SearchQuery) -> Result<Vec<PostPreview>, ContentError> {
        let mut posts = self.list_all()?;
        posts.retain(|post| query.matches(post));
        Ok(posts)
    }

    /// Tags of published posts with their post counts, most used first
    pub fn tags(&self) -> Result<Vec<(String, usize)>, ContentError> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for post in self.list_all()? {
            for tag in post.meta.tags {
                *counts.entry(tag).or_insert(0) += 1;
            }
        }

        let mut tags: Vec<_> = counts.into_iter().collect();
        tags.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(tags)
    }
}

/// Descending by parsed date; unparsable dates go last
fn newest_first(a: &PostPreview, b: &PostPreview) -> Ordering {
    match (a.meta.timestamp(), b.meta.timestamp()) {
        (Some(a_date), Some(b_date)) => b_date.cmp(&a_date),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
