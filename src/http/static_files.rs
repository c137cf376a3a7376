//! Static asset serving.
//!
//! # Responsibilities
//! - Resolve a root-relative path under the configured static root
//! - Read the whole file and label it with a content type
//!
//! # Design Decisions
//! - The root is explicit configuration, never the process working directory
//! - Targets that canonicalize outside the root are reported as not found
//! - `fixed` mode labels everything `text/html`; `extension` mode looks the
//!   type up from the file name

use std::io;
use std::path::{Path, PathBuf};

use axum::body::Bytes;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use tokio::fs;

use crate::config::ContentTypeMode;
use crate::http::error::RelayError;
use crate::http::headers::HeaderPolicy;
use crate::http::mime;
use crate::http::response::OutgoingResponse;

/// Serves files from one directory.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
    content_type: ContentTypeMode,
    policy: HeaderPolicy,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>, content_type: ContentTypeMode, policy: HeaderPolicy) -> Self {
        Self {
            root: root.into(),
            content_type,
            policy,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Serve `local_path` (relative to the root).
    pub async fn serve(&self, local_path: &str) -> Result<OutgoingResponse, RelayError> {
        let file_path = self.locate(local_path).await?;

        let content = fs::read(&file_path).await.map_err(|e| {
            tracing::error!(path = %file_path.display(), error = %e, "Failed to read file");
            RelayError::Io {
                path: local_path.to_string(),
                source: e,
            }
        })?;

        let content_type = match self.content_type {
            ContentTypeMode::Fixed => "text/html",
            ContentTypeMode::Extension => {
                mime::content_type_for(file_path.extension().and_then(|e| e.to_str()))
            }
        };

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        self.policy.apply_cors(&mut headers);

        tracing::debug!(path = %local_path, bytes = content.len(), "Static file served");

        Ok(OutgoingResponse::new(
            StatusCode::OK,
            headers,
            Bytes::from(content),
        ))
    }

    /// Canonical location of `local_path`, refusing anything outside the root.
    async fn locate(&self, local_path: &str) -> Result<PathBuf, RelayError> {
        let not_found = || RelayError::NotFound {
            path: local_path.to_string(),
        };

        let root = fs::canonicalize(&self.root).await.map_err(|e| {
            tracing::warn!(root = %self.root.display(), error = %e, "Static root not accessible");
            RelayError::Io {
                path: local_path.to_string(),
                source: e,
            }
        })?;

        let candidate = match fs::canonicalize(root.join(local_path)).await {
            Ok(path) => path,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(not_found()),
            Err(e) => {
                return Err(RelayError::Io {
                    path: local_path.to_string(),
                    source: e,
                })
            }
        };

        if !candidate.starts_with(&root) {
            tracing::warn!(
                requested = %local_path,
                resolved = %candidate.display(),
                "Path traversal attempt blocked"
            );
            return Err(not_found());
        }

        Ok(candidate)
    }
}

/// Serve `local_path` from `root` with fixed content type and strict CORS headers.
pub async fn serve(local_path: &str, root: &Path) -> Result<OutgoingResponse, RelayError> {
    StaticFiles::new(
        root,
        ContentTypeMode::Fixed,
        HeaderPolicy::new(crate::config::HeaderMode::Strict),
    )
    .serve(local_path)
    .await
}
