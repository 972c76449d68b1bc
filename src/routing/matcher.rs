//! Path matching logic.
//!
//! # Responsibilities
//! - Match exact request paths (`/`, `/index.html`, `/favicon.ico`)
//! - Match file suffixes (`.user.js`, `.html`)
//!
//! # Design Decisions
//! - Matching is case-sensitive, like the filesystem it fronts
//! - Empty matcher = never matches
//! - No regex to guarantee O(n) matching

/// Trait for matching request paths against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the (decoded) request path matches this condition.
    fn matches(&self, path: &str) -> bool;
}

/// Matches one of a fixed set of paths.
#[derive(Debug, Clone)]
pub struct ExactMatcher {
    paths: Vec<String>,
}

impl ExactMatcher {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

impl Matcher for ExactMatcher {
    fn matches(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }
}

/// Matches paths ending with any of the configured suffixes.
#[derive(Debug, Clone)]
pub struct SuffixMatcher {
    suffixes: Vec<String>,
}

impl SuffixMatcher {
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            suffixes: suffixes.into_iter().map(Into::into).collect(),
        }
    }
}

impl Matcher for SuffixMatcher {
    fn matches(&self, path: &str) -> bool {
        self.suffixes.iter().any(|s| path.ends_with(s.as_str()))
    }
}
