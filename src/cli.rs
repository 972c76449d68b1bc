//! Command-line and environment overrides.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::config::{load_config, ConfigError, ServerConfig};

#[derive(Debug, Parser)]
#[command(name = "userscript-dev-server", version)]
#[command(about = "Serve userscripts to devices on your network with dev metadata", long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "DEV_SERVER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Port to listen on (keeps the configured host)
    #[arg(short, long, env = "DEV_SERVER_PORT")]
    pub port: Option<u16>,

    /// Directory holding the userscripts
    #[arg(long, env = "DEV_SERVER_SCRIPTS_DIR")]
    pub scripts_dir: Option<PathBuf>,

    /// Directory holding manual test pages
    #[arg(long, env = "DEV_SERVER_PAGES_DIR")]
    pub pages_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "DEV_SERVER_LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    /// Layer the overrides onto `config`.
    pub fn apply(&self, config: &mut ServerConfig) {
        if let Some(port) = self.port {
            config.listener.bind_address = match config.listener.bind_address.parse::<SocketAddr>() {
                Ok(mut addr) => {
                    addr.set_port(port);
                    addr.to_string()
                }
                Err(_) => format!("0.0.0.0:{}", port),
            };
        }
        if let Some(dir) = &self.scripts_dir {
            config.directories.scripts_root = dir.clone();
        }
        if let Some(dir) = &self.pages_dir {
            config.directories.pages_root = dir.clone();
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
    }

    /// Config file (or defaults) plus overrides, validated.
    pub fn resolve_config(&self) -> Result<ServerConfig, ConfigError> {
        load_config(self.config.as_deref(), |config| self.apply(config))
    }
}
