//! List site content

use anyhow::Result;
use std::io::Write;

use crate::content::PostPreview;
use crate::Blog;

/// List site content by type
pub fn run<W: Write>(blog: &Blog, content_type: &str, json: bool, out: &mut W) -> Result<()> {
    let repo = blog.posts();

    match content_type {
        "post" | "posts" => {
            let posts = repo.list_all()?;
            if json {
                serde_json::to_writer_pretty(&mut *out, &posts)?;
                writeln!(out)?;
            } else {
                writeln!(out, "Posts ({}):", posts.len())?;
                write_previews(out, &posts)?;
            }
        }
        "slug" | "slugs" => {
            let slugs = repo.list_slugs()?;
            if json {
                serde_json::to_writer_pretty(&mut *out, &slugs)?;
                writeln!(out)?;
            } else {
                for slug in slugs {
                    writeln!(out, "{}", slug)?;
                }
            }
        }
        "tag" | "tags" => {
            let tags = repo.tags()?;
            if json {
                let map: serde_json::Map<String, serde_json::Value> = tags
                    .into_iter()
                    .map(|(tag, count)| (tag, count.into()))
                    .collect();
                serde_json::to_writer_pretty(&mut *out, &map)?;
                writeln!(out)?;
            } else {
                writeln!(out, "Tags ({}):", tags.len())?;
                for (tag, count) in tags {
                    writeln!(out, "  {} ({})", tag, count)?;
                }
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, slug, tag",
                content_type
            );
        }
    }

    Ok(())
}

/// One line per post: date, title and slug
pub(crate) fn write_previews<W: Write>(out: &mut W, posts: &[PostPreview]) -> Result<()> {
    for post in posts {
        let date = post
            .meta
            .timestamp()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| post.meta.date.clone());
        writeln!(out, "  {} - {} [{}]", date, post.meta.title, post.slug)?;
    }
    Ok(())
}
