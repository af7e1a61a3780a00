//! Search posts

use anyhow::Result;
use std::io::Write;

use super::list::write_previews;
use crate::content::SearchQuery;
use crate::Blog;

/// Print published posts matching a text query and/or tags
pub fn run<W: Write>(
    blog: &Blog,
    query: Option<&str>,
    tags: &[String],
    json: bool,
    out: &mut W,
) -> Result<()> {
    let mut search = SearchQuery::new().tags(tags.iter().cloned());
    if let Some(text) = query {
        search = search.text(text);
    }

    let posts = blog.posts().search(&search)?;
    tracing::debug!("Search {:?} matched {} posts", search, posts.len());

    if json {
        serde_json::to_writer_pretty(&mut *out, &posts)?;
        writeln!(out)?;
    } else if posts.is_empty() {
        writeln!(out, "No posts found.")?;
    } else {
        writeln!(out, "Found {} posts:", posts.len())?;
        write_previews(out, &posts)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn blog() -> (TempDir, Blog) {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("posts");
        fs::create_dir(&dir).unwrap();
        fs::write(
            dir.join("rust.md"),
            "---\ntitle: Rust Tips\ndate: 2024-02-01\ntags: [rust]\n---\n",
        )
        .unwrap();
        fs::write(
            dir.join("go.md"),
            "---\ntitle: Go Tips\ndate: 2024-01-01\ntags: [go]\ndescription: not rust\n---\n",
        )
        .unwrap();
        let blog = Blog::new(tmp.path()).unwrap();
        (tmp, blog)
    }

    fn output(blog: &Blog, query: Option<&str>, tags: &[&str]) -> String {
        let tags: Vec<String> = tags.iter().map(|t| t.to_string()).collect();
        let mut out = Vec::new();
        run(blog, query, &tags, false, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_search_text() {
        let (_tmp, blog) = blog();
        let text = output(&blog, Some("rust"), &[]);
        assert!(text.starts_with("Found 2 posts:\n"));
        // newest first
        assert!(text.find("[rust]").unwrap() < text.find("[go]").unwrap());
    }

    #[test]
    fn test_search_tags() {
        let (_tmp, blog) = blog();
        let text = output(&blog, None, &["go"]);
        assert_eq!(text, "Found 1 posts:\n  2024-01-01 - Go Tips [go]\n");
    }

    #[test]
    fn test_search_nothing() {
        let (_tmp, blog) = blog();
        assert_eq!(output(&blog, Some("xyz123nonexistent456"), &[]), "No posts found.\n");
    }
}
