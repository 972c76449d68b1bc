//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → router.rs (decode, classify by exact path / suffix)
//!     → matcher.rs (evaluate match conditions)
//!     → Route: Index | Favicon | AuxiliaryPage | RewritableFile
//!              | StaticPassthrough | Rejected
//!
//! File routes at dispatch time:
//!     → sandbox.rs (lexical containment, canonicalize, containment again)
//!     → real path, NotFound (try fallback route) or Escapes (403)
//! ```
//!
//! # Design Decisions
//! - Classification is pure; the HTTP layer performs all I/O
//! - Deterministic: same input always yields the same route
//! - First match wins (fixed priority order)

pub mod matcher;
pub mod router;
pub mod sandbox;

pub use router::{Route, Router};
pub use sandbox::{ResolveError, SandboxRoot};
