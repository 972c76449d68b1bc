//! Startup orchestration.
//!
//! # Responsibilities
//! - Define the fatal startup errors
//! - Announce where the server can be reached and what it serves
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Per-request errors never reach this module

use std::io;
use std::net::IpAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::http::server::ServerState;
use crate::index::list_scripts;
use crate::net::listener::ListenerError;

/// Errors that stop the server before it accepts traffic.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("scripts directory {path} is unusable: {source}")]
    ScriptsRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("listener: {0}")]
    Listener(#[from] ListenerError),

    #[error("metrics exporter: {0}")]
    Metrics(String),
}

/// Base URL other devices on the network should use.
pub fn base_url(ip: IpAddr, port: u16) -> String {
    match ip {
        IpAddr::V4(v4) => format!("http://{}:{}", v4, port),
        IpAddr::V6(v6) => format!("http://[{}]:{}", v6, port),
    }
}

/// Log the reachable URL, the served directory and one URL per script.
pub async fn announce(state: &ServerState, ip: IpAddr, port: u16) {
    let base = base_url(ip, port);
    tracing::info!(url = %base, "Dev server running");
    tracing::info!(directory = %state.scripts.path().display(), "Serving scripts");

    let scripts = list_scripts(state.scripts.path(), &state.script_suffixes).await;
    if scripts.is_empty() {
        tracing::warn!("No userscripts found");
    }
    for name in &scripts {
        tracing::info!(url = %format!("{}/{}", base, name), "Available script");
    }
    tracing::info!(url = %base, "Open in a browser to see all scripts; press Ctrl+C to stop");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    use crate::config::load_config;

    #[test]
    fn formats_base_urls() {
        assert_eq!(
            base_url(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 20)), 8080),
            "http://192.168.1.20:8080"
        );
        assert_eq!(base_url(IpAddr::V6(Ipv6Addr::LOCALHOST), 80), "http://[::1]:80");
    }

    #[test]
    fn config_errors_become_startup_errors() {
        let err = load_config(None, |c| c.timeouts.request_secs = 0)
            .map_err(StartupError::from)
            .unwrap_err();
        match &err {
            StartupError::Config(ConfigError::Validation(errors)) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
                assert_eq!(fields, ["timeouts.request_secs"]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().starts_with("configuration: Validation failed: "));
    }
}
