//! Client-facing responses.
//!
//! # Responsibilities
//! - Hold the status, headers and buffered body sent back to the client
//! - Build error and preflight responses with the CORS header set
//!
//! # Design Decisions
//! - Bodies are fully buffered; nothing is re-chunked
//! - Error responses carry CORS headers so browser code can read the status

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, HeaderValue, Response, StatusCode};
use axum::response::IntoResponse;

use crate::http::error::RelayError;
use crate::http::headers::HeaderPolicy;

/// A response ready to be written to the client.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl OutgoingResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Plain-text error response for a failed request.
    pub fn from_error(err: &RelayError, policy: &HeaderPolicy) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        policy.apply_cors(&mut headers);
        Self::new(err.status(), headers, Bytes::from(err.to_string()))
    }

    /// `204 No Content` answer to a CORS preflight.
    pub fn preflight(policy: &HeaderPolicy) -> Self {
        let mut headers = HeaderMap::new();
        policy.apply_cors(&mut headers);
        Self::new(StatusCode::NO_CONTENT, headers, Bytes::new())
    }
}

impl IntoResponse for OutgoingResponse {
    fn into_response(self) -> axum::response::Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}
