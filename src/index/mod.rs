//! Index page: what the server offers, read fresh per request.
//!
//! # Data Flow
//! ```text
//! GET / or /index.html
//!     → listing.rs (scripts root + pages root, filtered and sorted)
//!     → page.rs (HTML with one link per file)
//! ```

pub mod listing;
pub mod page;

pub use listing::{list_pages, list_scripts, Listing};
pub use page::render_index;
