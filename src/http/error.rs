//! Per-request error kinds and their HTTP mapping.

use std::io;
use std::string::FromUtf8Error;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::routing::ResolveError;

/// Why a request could not be served.
///
/// `Read` and `Encoding` are both processing failures: surfaced as 500 with
/// a diagnostic, never retried.
#[derive(Debug, Error)]
pub enum ServeError {
    /// Resolved path escapes its root. The requested path is not echoed back.
    #[error("Access denied")]
    PathTraversalRejected(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Error processing {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Error processing {path}: content is not valid UTF-8")]
    Encoding {
        path: String,
        #[source]
        source: FromUtf8Error,
    },
}

impl ServeError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServeError::PathTraversalRejected(_) => StatusCode::FORBIDDEN,
            ServeError::NotFound(_) => StatusCode::NOT_FOUND,
            ServeError::Read { .. } | ServeError::Encoding { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ServeError::PathTraversalRejected(_) => "path_traversal_rejected",
            ServeError::NotFound(_) => "not_found",
            ServeError::Read { .. } | ServeError::Encoding { .. } => "processing_failure",
        }
    }
}

impl From<ResolveError> for ServeError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::Escapes(path) => ServeError::PathTraversalRejected(path),
            ResolveError::NotFound(path) => ServeError::NotFound(path),
            ResolveError::Io { path, source } => ServeError::Read { path, source },
        }
    }
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        (
            self.status(),
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}
