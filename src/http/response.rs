//! Response construction.
//!
//! # Responsibilities
//! - Attach anti-caching headers to every dynamic response
//! - Allow cross-origin fetches of rewritten scripts (update checks)
//! - Pick content types for served files
//!
//! # Design Decisions
//! - Userscript managers cache aggressively; dynamic content is never cacheable
//! - Static assets keep plain headers

use std::path::Path;

use axum::body::Body;
use axum::http::{header, HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};

pub const CACHE_CONTROL_VALUE: &str = "no-store, no-cache, must-revalidate";

pub const SCRIPT_CONTENT_TYPE: &str = "application/javascript; charset=utf-8";
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Headers preventing any client or proxy cache from keeping the response.
pub const NO_CACHE_HEADERS: [(HeaderName, &str); 3] = [
    (header::CACHE_CONTROL, CACHE_CONTROL_VALUE),
    (header::PRAGMA, "no-cache"),
    (header::EXPIRES, "0"),
];

/// Rendered index page.
pub fn html(body: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, HTML_CONTENT_TYPE)],
        NO_CACHE_HEADERS,
        body,
    )
        .into_response()
}

/// Rewritten userscript.
pub fn script(body: String) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, SCRIPT_CONTENT_TYPE),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        ],
        NO_CACHE_HEADERS,
        body,
    )
        .into_response()
}

/// Test page bytes, served verbatim.
pub fn page(bytes: Vec<u8>, content_type: &'static str) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type)],
        NO_CACHE_HEADERS,
        Body::from(bytes),
    )
        .into_response()
}

/// Static asset bytes.
pub fn asset(bytes: Vec<u8>, content_type: &'static str) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type)],
        Body::from(bytes),
    )
        .into_response()
}

/// Empty success, used for `/favicon.ico`.
pub fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

/// Content type from the file extension.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("html") | Some("htm") => HTML_CONTENT_TYPE,
        Some("js") | Some("mjs") => SCRIPT_CONTENT_TYPE,
        Some("css") => "text/css; charset=utf-8",
        Some("json") => "application/json",
        Some("txt") | Some("md") => "text/plain; charset=utf-8",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
