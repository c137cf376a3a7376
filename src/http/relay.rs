//! Upstream relay.
//!
//! # Responsibilities
//! - Build the outbound request from a client request and a resolved upstream
//! - Perform exactly one upstream exchange and buffer the response
//! - Translate the upstream response (or failure) for the client
//!
//! # Design Decisions
//! - No retries and no caching
//! - Redirects are followed; any final non-2xx status other than
//!   `304 Not Modified` is an error
//! - Compressed upstream bodies are decoded, since `Content-Encoding` is
//!   never passed back to the client; the client's `Accept-Encoding` is
//!   replaced by the encodings this side can decode
//! - Every exchange is bounded by the configured request timeout

use std::time::Duration;

use axum::http::{header, Extensions, StatusCode};

use crate::config::UpstreamConfig;
use crate::http::error::RelayError;
use crate::http::headers::{Direction, HeaderPolicy};
use crate::http::request::IncomingRequest;
use crate::http::response::OutgoingResponse;

/// Absolute upstream URL: host and rewritten path concatenated byte for byte.
pub fn upstream_url(host: &str, rewritten_path: &str) -> String {
    format!("{host}{rewritten_path}")
}

/// Build the outbound HTTP client.
pub fn build_client(config: &UpstreamConfig) -> reqwest::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .timeout(Duration::from_secs(config.request_timeout_secs));
    if !config.use_env_proxy {
        builder = builder.no_proxy();
    }
    builder.build()
}

/// Reason phrase sent by the upstream, when it differs from the canonical one.
fn upstream_reason(extensions: &Extensions) -> Option<&str> {
    extensions
        .get::<hyper::ext::ReasonPhrase>()
        .and_then(|reason| std::str::from_utf8(reason.as_bytes()).ok())
}

/// Forwards requests to upstreams.
#[derive(Debug, Clone)]
pub struct Relay {
    client: reqwest::Client,
    policy: HeaderPolicy,
}

impl Relay {
    pub fn new(client: reqwest::Client, policy: HeaderPolicy) -> Self {
        Self { client, policy }
    }

    /// Relay one request to `host + rewritten_path` and build the client
    /// response.
    pub async fn relay(
        &self,
        request: IncomingRequest,
        host: &str,
        rewritten_path: &str,
    ) -> Result<OutgoingResponse, RelayError> {
        let url = upstream_url(host, rewritten_path);
        let method = request.method.as_http();

        tracing::debug!(
            method = %method,
            url = %url,
            body_bytes = request.body.as_ref().map_or(0, |b| b.len()),
            "Forwarding request upstream"
        );

        let mut headers = self.policy.filter(Direction::Inbound, &request.headers);
        // Negotiated by the outbound client, which decodes what it asks for.
        headers.remove(header::ACCEPT_ENCODING);

        let mut outbound = self.client.request(method, url.as_str()).headers(headers);
        if let Some(body) = request.body {
            outbound = outbound.body(body);
        }

        let response = outbound.send().await.map_err(|e| {
            let err = RelayError::unreachable(&url, e);
            tracing::warn!(url = %url, error = %err, "Upstream unreachable");
            err
        })?;

        let status = response.status();
        if !status.is_success() && status != StatusCode::NOT_MODIFIED {
            let err = RelayError::upstream_status(status, upstream_reason(response.extensions()));
            tracing::info!(url = %url, status = %status, reason = %err, "Upstream returned error status");
            return Err(err);
        }

        let mut headers = self.policy.filter(Direction::FromUpstream, response.headers());
        self.policy.apply_cors(&mut headers);

        let body = response.bytes().await.map_err(|e| {
            let err = RelayError::unreachable(&url, e);
            tracing::warn!(url = %url, error = %err, "Upstream body read failed");
            err
        })?;

        tracing::debug!(url = %url, status = %status, body_bytes = body.len(), "Upstream response relayed");

        Ok(OutgoingResponse::new(status, headers, body))
    }
}
