//! Render a single post

use anyhow::Result;
use serde::Serialize;
use std::io::Write;

use crate::content::Post;
use crate::Blog;

#[derive(Serialize)]
struct RenderedPost<'a> {
    #[serde(flatten)]
    post: &'a Post,
    html: &'a str,
}

/// Render the post with the given slug to HTML
pub async fn run<W: Write>(blog: &Blog, slug: &str, json: bool, out: &mut W) -> Result<()> {
    let Some(post) = blog.posts().get_by_slug(slug)? else {
        anyhow::bail!("Post not found: {}", slug);
    };

    let html = blog.renderer().render(&post.content).await;

    if json {
        let rendered = RenderedPost {
            post: &post,
            html: &html,
        };
        serde_json::to_writer_pretty(&mut *out, &rendered)?;
        writeln!(out)?;
    } else {
        write!(out, "{}", html)?;
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
            dir.join("2024-01-15-hello.md"),
            "---\ntitle: Hello\n---\n# Hi\n\n[x](javascript:alert(1))\n",
        )
        .unwrap();
        fs::write(dir.join("draft.md"), "---\npublished: false\n---\nwip").unwrap();
        let blog = Blog::new(tmp.path()).unwrap();
        (tmp, blog)
    }

    #[tokio::test]
    async fn test_show_renders_html() {
        let (_tmp, blog) = blog();
        let mut out = Vec::new();
        run(&blog, "hello", false, &mut out).await.unwrap();
        let html = String::from_utf8(out).unwrap();
        assert!(html.contains(r#"<h1 id="hi">"#));
        assert!(!html.contains("javascript:"));
    }

    #[tokio::test]
    async fn test_show_json() {
        let (_tmp, blog) = blog();
        let mut out = Vec::new();
        run(&blog, "hello", true, &mut out).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["slug"], "hello");
        assert_eq!(json["title"], "Hello");
        assert!(json["content"].as_str().unwrap().starts_with("# Hi"));
        assert!(json["html"].as_str().unwrap().contains("<h1"));
    }

    #[tokio::test]
    async fn test_show_missing_or_draft() {
        let (_tmp, blog) = blog();
        let mut out = Vec::new();
        assert!(run(&blog, "nope", false, &mut out).await.is_err());
        assert!(run(&blog, "draft", false, &mut out).await.is_err());
    }
}
