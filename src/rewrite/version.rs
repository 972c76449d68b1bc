//! Time-derived version tokens.

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch, stamped into `@version`.
///
/// Derived from the wall clock rather than a counter, so tokens keep
/// increasing across restarts and need no shared state between requests.
/// Two requests in the same millisecond get the same token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionToken(u64);

impl VersionToken {
    /// Token for the current wall-clock instant.
    pub fn now() -> Self {
        Self::at(SystemTime::now())
    }

    /// Token for a given instant. Instants before the epoch map to zero.
    pub fn at(instant: SystemTime) -> Self {
        let since_epoch = instant.duration_since(UNIX_EPOCH).unwrap_or(Duration::ZERO);
        Self(u64::try_from(since_epoch.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
