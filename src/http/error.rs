//! Relay error taxonomy and its mapping to client-visible statuses.
//!
//! An unmatched route is not an error: it is the static fallback.

use std::error::Error;
use std::io;

use axum::http::{Method, StatusCode};

/// Every way a single request can fail.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// DNS failure, refused connection, timeout or a broken body read.
    /// `detail` spells out the whole cause chain.
    #[error("URL error: {detail}")]
    UpstreamUnreachable {
        url: String,
        detail: String,
        #[source]
        source: reqwest::Error,
    },

    /// Upstream answered with a non-success status.
    #[error("{reason}")]
    UpstreamHttp { status: StatusCode, reason: String },

    #[error("File not found")]
    NotFound { path: String },

    #[error("File error: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The client request could not be understood (bad `Content-Length`,
    /// unreadable body).
    #[error("Proxy error: {0}")]
    MalformedRequest(String),

    /// A bug surfaced while handling the request (e.g. a caught panic).
    #[error("Proxy error: {0}")]
    Internal(String),

    #[error("Payload too large")]
    PayloadTooLarge { limit: usize },

    #[error("Unsupported method ('{0}')")]
    UnsupportedMethod(Method),
}

impl RelayError {
    /// Status sent to the client.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::UpstreamUnreachable { .. }
            | RelayError::Io { .. }
            | RelayError::MalformedRequest(_)
            | RelayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::UpstreamHttp { status, .. } => *status,
            RelayError::NotFound { .. } => StatusCode::NOT_FOUND,
            RelayError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            RelayError::UnsupportedMethod(_) => StatusCode::NOT_IMPLEMENTED,
        }
    }

    /// Build the error for an upstream status. The upstream's own reason
    /// phrase wins; otherwise the canonical one is used.
    pub fn upstream_status(status: StatusCode, reason: Option<&str>) -> Self {
        let reason = reason
            .filter(|r| !r.is_empty())
            .or_else(|| status.canonical_reason())
            .unwrap_or("Upstream Error");
        RelayError::UpstreamHttp {
            status,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn unreachable(url: &str, source: reqwest::Error) -> Self {
        RelayError::UpstreamUnreachable {
            url: url.to_string(),
            detail: error_chain(&source),
            source,
        }
    }
}

/// `outer: cause: root cause`, skipping causes already printed by their parent.
pub(crate) fn error_chain(err: &(dyn Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
