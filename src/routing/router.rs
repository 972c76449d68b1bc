//! Request classification.
//!
//! # Responsibilities
//! - Decode the request path
//! - Classify it into exactly one [`Route`], in fixed priority order
//! - Name the next route for file routes whose target does not exist
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Pure: no filesystem access, so every decision is unit-testable
//! - Explicit `Rejected` rather than silently serving something else

use percent_encoding::percent_decode_str;

use crate::config::RoutingConfig;
use crate::routing::matcher::{ExactMatcher, Matcher, SuffixMatcher};

/// Where a request goes. File variants carry the decoded path relative to
/// their root (leading `/` removed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/` or `/index.html`.
    Index,
    /// `/favicon.ico`.
    Favicon,
    /// Test page under the pages root, served verbatim.
    AuxiliaryPage(String),
    /// Userscript under the scripts root, served rewritten.
    RewritableFile(String),
    /// Any other file under the scripts root.
    StaticPassthrough(String),
    /// Path cannot be served safely.
    Rejected,
}

impl Route {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Route::Index => "index",
            Route::Favicon => "favicon",
            Route::AuxiliaryPage(_) => "page",
            Route::RewritableFile(_) => "script",
            Route::StaticPassthrough(_) => "static",
            Route::Rejected => "rejected",
        }
    }
}

/// Classifies request paths.
#[derive(Debug)]
pub struct Router {
    index: ExactMatcher,
    favicon: ExactMatcher,
    pages: SuffixMatcher,
    scripts: SuffixMatcher,
}

impl Router {
    /// Build the classifier from the routing configuration.
    pub fn from_config(config: &RoutingConfig) -> Self {
        Self {
            index: ExactMatcher::new(["/", "/index.html"]),
            favicon: ExactMatcher::new(["/favicon.ico"]),
            pages: SuffixMatcher::new(config.page_suffixes.iter().cloned()),
            scripts: SuffixMatcher::new(config.script_suffixes.iter().cloned()),
        }
    }

    /// Classify a URI path (query string already removed).
    pub fn classify(&self, uri_path: &str) -> Route {
        let decoded = match percent_decode_str(uri_path).decode_utf8() {
            Ok(decoded) => decoded,
            Err(_) => return Route::Rejected,
        };
        if decoded.contains('\0') {
            return Route::Rejected;
        }

        if self.index.matches(&decoded) {
            return Route::Index;
        }
        if self.favicon.matches(&decoded) {
            return Route::Favicon;
        }

        let relative = decoded.trim_start_matches('/').to_string();
        if self.pages.matches(&decoded) {
            Route::AuxiliaryPage(relative)
        } else if self.scripts.matches(&decoded) {
            Route::RewritableFile(relative)
        } else {
            Route::StaticPassthrough(relative)
        }
    }

    /// Next route to try when `route`'s file does not exist. A missing page
    /// is tried as a script first when it also carries a script suffix.
    pub fn fall_through(&self, route: &Route) -> Option<Route> {
        match route {
            Route::AuxiliaryPage(path) if self.scripts.matches(path) => {
                Some(Route::RewritableFile(path.clone()))
            }
            Route::AuxiliaryPage(path) | Route::RewritableFile(path) => {
                Some(Route::StaticPassthrough(path.clone()))
            }
            _ => None,
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::from_config(&RoutingConfig::default())
    }
}
