//! Directory listings for the index page.

use std::io;
use std::path::Path;

use crate::routing::matcher::{Matcher, SuffixMatcher};

/// Files shown on the index page, each list sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub scripts: Vec<String>,
    pub pages: Vec<String>,
}

/// Names of regular files directly under `dir` accepted by `keep`, sorted.
pub async fn list_files<F>(dir: &Path, keep: F) -> io::Result<Vec<String>>
where
    F: Fn(&str) -> bool,
{
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        // Names that are not valid UTF-8 cannot be linked; skip them.
        if let Ok(name) = entry.file_name().into_string() {
            if keep(&name) {
                names.push(name);
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Userscripts available under the scripts root.
///
/// A root that cannot be listed degrades to an empty list.
pub async fn list_scripts(root: &Path, suffixes: &SuffixMatcher) -> Vec<String> {
    match list_files(root, |name| suffixes.matches(name)).await {
        Ok(names) => names,
        Err(e) => {
            tracing::warn!(root = %root.display(), error = %e, "Cannot list scripts");
            Vec::new()
        }
    }
}

/// Test pages under the pages root, minus hidden helpers.
///
/// A missing pages root is normal and yields an empty list.
pub async fn list_pages(
    root: Option<&Path>,
    suffixes: &SuffixMatcher,
    hidden: &SuffixMatcher,
) -> Vec<String> {
    let Some(root) = root else {
        return Vec::new();
    };
    list_files(root, |name| suffixes.matches(name) && !hidden.matches(name))
        .await
        .unwrap_or_default()
}
