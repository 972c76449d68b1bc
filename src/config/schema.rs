//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the dev server.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the dev server.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Served directory roots.
    pub directories: DirectoryConfig,

    /// Metadata rewrite rules.
    pub rewrite: RewriteConfig,

    /// File suffixes driving request classification.
    pub routing: RoutingConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Directories served by the dev server.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Userscripts and their assets. Must exist at startup.
    pub scripts_root: PathBuf,

    /// Manual test pages. May be absent.
    pub pages_root: PathBuf,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            scripts_root: PathBuf::from("src"),
            pages_root: PathBuf::from("test"),
        }
    }
}

/// Metadata rewrite configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RewriteConfig {
    /// Single-line comment marker introducing directives.
    pub comment_marker: String,

    /// Prepended to every `@name` value.
    pub name_prefix: String,

    /// Appended to every `@namespace` value.
    pub namespace_suffix: String,

    /// Directive keys removed from served scripts.
    pub stripped_keys: Vec<String>,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            comment_marker: "//".to_string(),
            name_prefix: "[DEV] ".to_string(),
            namespace_suffix: "/dev".to_string(),
            stripped_keys: ["update", "downloadURL", "updateURL", "icon"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Suffixes used to classify request paths.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RoutingConfig {
    /// Files rewritten before serving (resolved under `scripts_root`).
    pub script_suffixes: Vec<String>,

    /// Test pages served verbatim (resolved under `pages_root`).
    pub page_suffixes: Vec<String>,

    /// Pages reachable by URL but left off the index listing.
    pub hidden_page_suffixes: Vec<String>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            script_suffixes: vec![".user.js".to_string()],
            page_suffixes: vec![".html".to_string()],
            hidden_page_suffixes: vec!["-helper.html".to_string()],
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
