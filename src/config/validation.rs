//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Reject suffixes and keys the classifier or rewriter cannot use
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system
//! - Directory existence is checked at startup, not here

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::ServerConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `listener.bind_address`.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a configuration for semantic errors.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if config.rewrite.comment_marker.trim().is_empty() {
        errors.push(ValidationError::new("rewrite.comment_marker", "must not be empty"));
    }

    for key in &config.rewrite.stripped_keys {
        if key.is_empty() || key.chars().any(char::is_whitespace) {
            errors.push(ValidationError::new(
                "rewrite.stripped_keys",
                format!("'{}' is not a directive key", key),
            ));
        }
    }

    if config.routing.script_suffixes.is_empty() {
        errors.push(ValidationError::new("routing.script_suffixes", "at least one suffix is required"));
    }
    check_suffixes("routing.script_suffixes", &config.routing.script_suffixes, &mut errors);
    check_suffixes("routing.page_suffixes", &config.routing.page_suffixes, &mut errors);

    if config.routing.hidden_page_suffixes.iter().any(String::is_empty) {
        errors.push(ValidationError::new(
            "routing.hidden_page_suffixes",
            "an empty suffix would hide every page",
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than zero"));
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level '{}'", config.observability.log_level),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_suffixes(field: &'static str, suffixes: &[String], errors: &mut Vec<ValidationError>) {
    for suffix in suffixes {
        if !suffix.starts_with('.') || suffix.len() < 2 || suffix.contains('/') {
            errors.push(ValidationError::new(
                field,
                format!("'{}' must look like '.ext'", suffix),
            ));
        }
    }
}
