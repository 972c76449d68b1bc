//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Open the served roots and build the shared, read-only state
//! - Create Axum Router with the request handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Serve until the shutdown signal, draining in-flight requests

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, routing::get, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::handlers::serve;
use crate::http::request::{make_request_span, UuidRequestId};
use crate::lifecycle::{Shutdown, StartupError};
use crate::rewrite::{RewriteRules, Rewriter};
use crate::routing::matcher::SuffixMatcher;
use crate::routing::{Router as PathRouter, SandboxRoot};

/// Application state injected into handlers. Immutable after startup.
#[derive(Debug)]
pub struct ServerState {
    pub router: PathRouter,
    pub rewriter: Rewriter,
    pub scripts: SandboxRoot,
    /// `None` when the pages directory does not exist.
    pub pages: Option<SandboxRoot>,
    pub script_suffixes: SuffixMatcher,
    pub page_suffixes: SuffixMatcher,
    pub hidden_page_suffixes: SuffixMatcher,
}

impl ServerState {
    /// Open the configured roots. A missing scripts root is fatal; a missing
    /// pages root only disables test pages.
    pub fn from_config(config: &ServerConfig) -> Result<Self, StartupError> {
        let scripts_path = &config.directories.scripts_root;
        let scripts = SandboxRoot::open(scripts_path).map_err(|source| StartupError::ScriptsRoot {
            path: scripts_path.clone(),
            source,
        })?;

        let pages_path = &config.directories.pages_root;
        let pages = match SandboxRoot::open(pages_path) {
            Ok(root) => Some(root),
            Err(e) => {
                tracing::info!(
                    path = %pages_path.display(),
                    error = %e,
                    "Pages directory unavailable, test pages disabled"
                );
                None
            }
        };

        let routing = &config.routing;
        Ok(Self {
            router: PathRouter::from_config(routing),
            rewriter: Rewriter::new(RewriteRules::from(&config.rewrite)),
            scripts,
            pages,
            script_suffixes: SuffixMatcher::new(routing.script_suffixes.iter().cloned()),
            page_suffixes: SuffixMatcher::new(routing.page_suffixes.iter().cloned()),
            hidden_page_suffixes: SuffixMatcher::new(routing.hidden_page_suffixes.iter().cloned()),
        })
    }
}

/// HTTP server for the dev server.
pub struct HttpServer {
    router: Router,
    state: Arc<ServerState>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &ServerConfig) -> Result<Self, StartupError> {
        let state = Arc::new(ServerState::from_config(config)?);
        let router = Self::build_router(config, state.clone());
        Ok(Self { router, state })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: Arc<ServerState>) -> Router {
        Router::new()
            .route("/", get(serve))
            .route("/{*path}", get(serve))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                    .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
    }

    /// The configured router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Shared request state.
    pub fn state(&self) -> &Arc<ServerState> {
        &self.state
    }

    /// Run the server until `shutdown` is triggered, then let in-flight
    /// requests finish before returning.
    pub async fn run(self, listener: TcpListener, shutdown: &Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();
        let requested = shutdown.requested();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                requested.await;
                tracing::info!("Shutdown requested, draining in-flight requests");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
