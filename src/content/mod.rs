//! Content module - reads posts from disk and answers listing queries

mod frontmatter;
mod post;
mod repository;
mod search;
mod slug;

pub use frontmatter::{parse_date_string, FrontMatter, FrontMatterError};
pub use post::{Post, PostMetadata, PostPreview};
pub use repository::{ContentError, PostFile, PostRepository};
pub use search::SearchQuery;
pub use slug::{slug_from_path, slug_from_stem};
