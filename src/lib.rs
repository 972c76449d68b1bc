//! Userscript development server library.

pub mod cli;
pub mod config;
pub mod http;
pub mod index;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod rewrite;
pub mod routing;

pub use config::schema::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use rewrite::{Rewriter, Rewritten, VersionToken};
