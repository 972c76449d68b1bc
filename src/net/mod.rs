//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! ListenerConfig
//!     → listener.rs (parse & bind)
//!     → Hand off to HTTP layer (axum::serve, one task per connection)
//!
//! local_ip.rs: LAN-facing address, computed once at startup for the
//! announcement, passed explicitly (no global cache)
//! ```

pub mod listener;
pub mod local_ip;
