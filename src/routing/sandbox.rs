//! Path containment for served directories.
//!
//! # Responsibilities
//! - Canonicalize a served root once, at startup
//! - Resolve request-relative paths to real files under that root
//! - Reject anything that lands outside the root
//!
//! # Design Decisions
//! - Two checks: a lexical one before touching the filesystem, and a second
//!   one on the canonical target so symlinks cannot leave the root
//! - Containment compares path components, not string prefixes, so
//!   `/srv/scripts2` is never inside `/srv/scripts`
//! - Only regular files resolve; directories read as not found

use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Outcome of a failed resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("{0} escapes the served root")]
    Escapes(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("cannot resolve {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// A canonicalized directory that requests may not leave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxRoot {
    root: PathBuf,
}

impl SandboxRoot {
    /// Canonicalize `path` and ensure it is a directory.
    pub fn open(path: &Path) -> io::Result<Self> {
        let root = path.canonicalize()?;
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a directory", root.display()),
            ));
        }
        Ok(Self { root })
    }

    /// The canonical root.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Component-wise containment check against the canonical root.
    pub fn contains(&self, candidate: &Path) -> bool {
        candidate.starts_with(&self.root)
    }

    /// Join `relative` onto the root, folding `.` and `..` without touching
    /// the filesystem. Absolute or prefixed components are refused.
    pub fn join_lexically(&self, relative: &str) -> Result<PathBuf, ResolveError> {
        let mut joined = self.root.clone();
        for component in Path::new(relative).components() {
            match component {
                Component::Normal(part) => joined.push(part),
                Component::CurDir => {}
                Component::ParentDir => {
                    joined.pop();
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(ResolveError::Escapes(relative.to_string()));
                }
            }
        }

        if self.contains(&joined) {
            Ok(joined)
        } else {
            Err(ResolveError::Escapes(relative.to_string()))
        }
    }

    /// Resolve `relative` to an existing regular file inside the root.
    pub async fn resolve_file(&self, relative: &str) -> Result<PathBuf, ResolveError> {
        let joined = self.join_lexically(relative)?;

        let real = match tokio::fs::canonicalize(&joined).await {
            Ok(real) => real,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ResolveError::NotFound(relative.to_string()));
            }
            Err(source) => {
                return Err(ResolveError::Io {
                    path: relative.to_string(),
                    source,
                });
            }
        };

        if !self.contains(&real) {
            tracing::warn!(
                requested = %relative,
                target = %real.display(),
                "Symlink target outside served root"
            );
            return Err(ResolveError::Escapes(relative.to_string()));
        }

        match tokio::fs::metadata(&real).await {
            Ok(meta) if meta.is_file() => Ok(real),
            Ok(_) => Err(ResolveError::NotFound(relative.to_string())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ResolveError::NotFound(relative.to_string()))
            }
            Err(source) => Err(ResolveError::Io {
                path: relative.to_string(),
                source,
            }),
        }
    }
}
