//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, tracing span)
//!     → handlers.rs (classify via routing, then do the I/O)
//!         → static_files.rs (assets under the scripts root)
//!         → rewrite (userscripts)
//!     → response.rs (content types, no-cache and CORS headers)
//!     → error.rs (403 / 404 / 500 mapping)
//! ```

pub mod error;
pub mod handlers;
pub mod request;
pub mod response;
pub mod server;
pub mod static_files;

pub use error::ServeError;
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{HttpServer, ServerState};
