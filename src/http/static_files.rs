//! Static passthrough for assets under the scripts root.

use crate::http::error::ServeError;
use crate::http::response;
use crate::routing::SandboxRoot;

/// Serve `relative` from `root` verbatim, with a content type from its extension.
pub async fn serve(root: &SandboxRoot, relative: &str) -> Result<axum::response::Response, ServeError> {
    let path = root.resolve_file(relative).await?;
    let bytes = tokio::fs::read(&path).await.map_err(|source| ServeError::Read {
        path: relative.to_string(),
        source,
    })?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Serving static file");
    Ok(response::asset(bytes, response::content_type_for(&path)))
}
