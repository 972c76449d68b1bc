//! Request dispatch.
//!
//! The routing decision is made by [`crate::routing::Router::classify`];
//! this module only performs the I/O for the chosen route, follows the
//! not-found fallback chain and logs the outcome.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    response::{IntoResponse, Response},
};

use crate::http::error::ServeError;
use crate::http::request::request_id;
use crate::http::response;
use crate::http::server::ServerState;
use crate::http::static_files;
use crate::index::{list_pages, list_scripts, render_index, Listing};
use crate::observability::metrics;
use crate::rewrite::VersionToken;
use crate::routing::Route;

/// A successful response plus what the access log needs to know about it.
struct Served {
    response: Response,
    version: Option<VersionToken>,
}

impl From<Response> for Served {
    fn from(response: Response) -> Self {
        Self {
            response,
            version: None,
        }
    }
}

/// Single GET handler for every path.
pub async fn serve(State(state): State<Arc<ServerState>>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&request).to_string();
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());
    let path = request.uri().path().to_string();

    let mut route = state.router.classify(&path);
    let first_kind = route.kind();

    let result = loop {
        match dispatch(&state, &route).await {
            Err(ServeError::NotFound(missing)) => match state.router.fall_through(&route) {
                Some(next) => {
                    tracing::debug!(
                        request_id = %request_id,
                        path = %path,
                        from = route.kind(),
                        to = next.kind(),
                        "Falling through"
                    );
                    route = next;
                }
                None => break Err(ServeError::NotFound(missing)),
            },
            other => break other,
        }
    };

    match result {
        Ok(served) => {
            let status = served.response.status();
            match served.version {
                Some(version) => tracing::info!(
                    client = %client,
                    path = %path,
                    status = status.as_u16(),
                    route = route.kind(),
                    version = %version,
                    "Served rewritten script"
                ),
                None => tracing::info!(
                    client = %client,
                    path = %path,
                    status = status.as_u16(),
                    route = route.kind(),
                    "Served"
                ),
            }
            metrics::record_request(route.kind(), status.as_u16(), start_time);
            served.response
        }
        Err(err) => {
            let status = err.status();
            match &err {
                ServeError::PathTraversalRejected(_) => tracing::warn!(
                    request_id = %request_id,
                    client = %client,
                    path = %path,
                    route = first_kind,
                    "Rejected path outside served root"
                ),
                ServeError::NotFound(_) => tracing::info!(
                    client = %client,
                    path = %path,
                    status = status.as_u16(),
                    "Not found"
                ),
                ServeError::Read { .. } | ServeError::Encoding { .. } => tracing::error!(
                    request_id = %request_id,
                    client = %client,
                    path = %path,
                    error = %err,
                    "Failed to serve file"
                ),
            }
            metrics::record_request(route.kind(), status.as_u16(), start_time);
            err.into_response()
        }
    }
}

async fn dispatch(state: &ServerState, route: &Route) -> Result<Served, ServeError> {
    match route {
        Route::Index => serve_index(state).await.map(Served::from),
        Route::Favicon => Ok(response::no_content().into()),
        Route::AuxiliaryPage(relative) => serve_page(state, relative).await.map(Served::from),
        Route::RewritableFile(relative) => serve_script(state, relative).await,
        Route::StaticPassthrough(relative) => static_files::serve(&state.scripts, relative)
            .await
            .map(Served::from),
        Route::Rejected => Err(ServeError::PathTraversalRejected(String::new())),
    }
}

async fn serve_index(state: &ServerState) -> Result<Response, ServeError> {
    let listing = Listing {
        scripts: list_scripts(state.scripts.path(), &state.script_suffixes).await,
        pages: list_pages(
            state.pages.as_ref().map(|root| root.path()),
            &state.page_suffixes,
            &state.hidden_page_suffixes,
        )
        .await,
    };
    let html = render_index(&listing, &state.rewriter.rules().name_prefix);
    Ok(response::html(html.into_string()))
}

async fn serve_page(state: &ServerState, relative: &str) -> Result<Response, ServeError> {
    let Some(pages) = &state.pages else {
        return Err(ServeError::NotFound(relative.to_string()));
    };
    let path = pages.resolve_file(relative).await?;
    let bytes = tokio::fs::read(&path).await.map_err(|source| ServeError::Read {
        path: relative.to_string(),
        source,
    })?;
    Ok(response::page(bytes, response::content_type_for(&path)))
}

async fn serve_script(state: &ServerState, relative: &str) -> Result<Served, ServeError> {
    let path = state.scripts.resolve_file(relative).await?;
    let bytes = tokio::fs::read(&path).await.map_err(|source| ServeError::Read {
        path: relative.to_string(),
        source,
    })?;
    let content = String::from_utf8(bytes).map_err(|source| ServeError::Encoding {
        path: relative.to_string(),
        source,
    })?;

    let rewritten = state.rewriter.rewrite(&content);
    metrics::record_rewrite(rewritten.stripped);
    tracing::debug!(
        path = %relative,
        version = %rewritten.version,
        stripped = rewritten.stripped,
        "Rewrote script metadata"
    );

    Ok(Served {
        response: response::script(rewritten.content),
        version: Some(rewritten.version),
    })
}
