//! Userscript metadata rewriting subsystem.
//!
//! # Data Flow
//! ```text
//! raw script text
//!     → directive.rs (line scan: Directive{key, value} | Plain)
//!     → rewriter.rs (prefix name, suffix namespace, stamp version, strip keys)
//!     → re-serialize in original order with original line endings
//!     → Rewritten { content, version }
//! ```
//!
//! # Design Decisions
//! - Pure text transform: no I/O, wall-clock time is the only implicit input
//! - Lines are matched and replaced wholesale, never edited in place
//! - Absent directives are never synthesized
//! - Name prefix and namespace suffix are additive on every pass; content that
//!   already carries them gets them again

pub mod directive;
pub mod rewriter;
pub mod version;

pub use directive::{Directive, Line};
pub use rewriter::{RewriteRules, Rewriter, Rewritten};
pub use version::VersionToken;
