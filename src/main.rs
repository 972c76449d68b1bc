//! Userscript development server.
//!
//! Serves a directory of userscripts to devices on the local network,
//! rewriting each script's metadata block on every request so a dev copy
//! installs next to the released one and always looks updated.
//!
//! # Architecture Overview
//!
//! ```text
//!  device ──GET──▶ http::server ──▶ routing::Router::classify
//!                                         │
//!          ┌──────────────┬───────────────┼──────────────┬───────────────┐
//!          ▼              ▼               ▼              ▼               ▼
//!        index         favicon          page           script          static
//!     (listing +       (204)        (pages root)   (scripts root)  (scripts root)
//!       HTML)                             │              │               │
//!                                         └─ routing::sandbox (containment) ─┘
//!                                                        │
//!                                                        ▼
//!                                              rewrite::Rewriter
//!                                      ([DEV] name, /dev namespace,
//!                                      epoch-ms version, strip update/icon)
//! ```

use clap::Parser;

use userscript_dev_server::cli::Cli;
use userscript_dev_server::http::HttpServer;
use userscript_dev_server::lifecycle::{signals, startup, Shutdown, StartupError};
use userscript_dev_server::net::{listener, local_ip};
use userscript_dev_server::observability::{logging, metrics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.resolve_config().map_err(StartupError::from)?;

    logging::init_logging(&config.observability.log_level);

    tracing::info!("userscript-dev-server v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        scripts_root = %config.directories.scripts_root.display(),
        pages_root = %config.directories.pages_root.display(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Validation guarantees the address parses when metrics are enabled.
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr).map_err(|e| StartupError::Metrics(e.to_string()))?;
        }
    }

    let listener = listener::bind(&config.listener)
        .await
        .map_err(StartupError::from)?;
    let local_addr = listener.local_addr()?;

    let server = HttpServer::new(&config)?;

    let local_ip = local_ip::discover().await;
    startup::announce(server.state(), local_ip, local_addr.port()).await;

    let shutdown = Shutdown::new();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        let signal = signals::wait_for_signal().await;
        tracing::info!(signal, "Shutting down server...");
        signal_shutdown.trigger();
    });

    server.run(listener, &shutdown).await?;

    if shutdown.is_triggered() {
        tracing::info!("Server stopped");
    } else {
        tracing::warn!("Server stopped without a shutdown request");
    }
    Ok(())
}
