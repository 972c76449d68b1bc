//! The metadata rewrite rules.
//!
//! # Responsibilities
//! - Prefix every `@name` value with the dev marker
//! - Suffix every `@namespace` value so dev and release installs coexist
//! - Replace every `@version` value with a fresh [`VersionToken`]
//! - Drop directives pointing at external update/icon resources
//!
//! # Design Decisions
//! - Rules only touch directive lines; plain lines are copied untouched
//! - Empty `@name`/`@namespace` values are left alone
//! - Stripped lines disappear together with their line terminator

use std::borrow::Cow;
use std::collections::BTreeSet;

use crate::config::RewriteConfig;
use crate::rewrite::directive::{self, Directive, Line};
use crate::rewrite::version::VersionToken;

pub const NAME_KEY: &str = "name";
pub const NAMESPACE_KEY: &str = "namespace";
pub const VERSION_KEY: &str = "version";

/// Rule parameters, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRules {
    pub comment_marker: String,
    pub name_prefix: String,
    pub namespace_suffix: String,
    pub stripped_keys: BTreeSet<String>,
}

impl From<&RewriteConfig> for RewriteRules {
    fn from(config: &RewriteConfig) -> Self {
        Self {
            comment_marker: config.comment_marker.clone(),
            name_prefix: config.name_prefix.clone(),
            namespace_suffix: config.namespace_suffix.clone(),
            stripped_keys: config.stripped_keys.iter().cloned().collect(),
        }
    }
}

impl Default for RewriteRules {
    fn default() -> Self {
        Self::from(&RewriteConfig::default())
    }
}

/// Output of a rewrite pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    pub content: String,
    pub version: VersionToken,
    /// Number of directive lines removed.
    pub stripped: usize,
}

/// Applies [`RewriteRules`] to script text.
#[derive(Debug, Clone, Default)]
pub struct Rewriter {
    rules: RewriteRules,
}

impl Rewriter {
    pub fn new(rules: RewriteRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RewriteRules {
        &self.rules
    }

    /// Rewrite `content`, stamping the current wall-clock time as version.
    pub fn rewrite(&self, content: &str) -> Rewritten {
        self.rewrite_with(content, VersionToken::now())
    }

    /// Rewrite `content` with an explicit version token.
    pub fn rewrite_with(&self, content: &str, version: VersionToken) -> Rewritten {
        let version_text = version.to_string();
        let mut stripped = 0;

        let lines: Vec<Line<'_>> = directive::scan(content, &self.rules.comment_marker)
            .into_iter()
            .filter_map(|line| match line {
                Line::Directive(d) => match self.apply(d, &version_text) {
                    Some(d) => Some(Line::Directive(d)),
                    None => {
                        stripped += 1;
                        None
                    }
                },
                plain => Some(plain),
            })
            .collect();

        Rewritten {
            content: directive::serialize(&lines),
            version,
            stripped,
        }
    }

    /// Returns `None` when the directive must be dropped.
    fn apply<'a>(&self, d: Directive<'a>, version: &str) -> Option<Directive<'a>> {
        let key = d.key();
        if self.rules.stripped_keys.contains(key) {
            return None;
        }

        let rewritten = match key {
            NAME_KEY if !d.value().is_empty() => {
                let value = format!("{}{}", self.rules.name_prefix, d.value());
                d.with_value(value)
            }
            NAMESPACE_KEY if !d.value().is_empty() => {
                let value = format!("{}{}", d.value(), self.rules.namespace_suffix);
                d.with_value(value)
            }
            VERSION_KEY => d.with_value(Cow::Owned(version.to_owned())),
            _ => d,
        };
        Some(rewritten)
    }
}
