//! Filename to slug derivation

use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

lazy_static! {
    static ref YEAR: Regex = Regex::new(r"^[0-9]{4}$").unwrap();
    static ref MONTH_OR_DAY: Regex = Regex::new(r"^[0-9]{2}$").unwrap();
}

/// Derive a slug from a file stem.
///
/// A `YYYY-MM-DD-` prefix is dropped when something follows it, so
/// `2024-01-15-first-post` becomes `first-post`. Anything else is returned
/// unchanged.
pub fn slug_from_stem(stem: &str) -> String {
    let parts: Vec<&str> = stem.split('-').collect();
    if parts.len() >= 4
        && YEAR.is_match(parts[0])
        && MONTH_OR_DAY.is_match(parts[1])
        && MONTH_OR_DAY.is_match(parts[2])
    {
        parts[3..].join("-")
    } else {
        stem.to_string()
    }
}

/// Derive a slug from a markdown file path, or None if it is not a `.md` file
pub fn slug_from_path(path: &Path) -> Option<String> {
    if !is_markdown_file(path) {
        return None;
    }
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(slug_from_stem)
}

/// Check if a path has the `.md` extension
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}
