//! Request extraction.
//!
//! # Responsibilities
//! - Map the HTTP method onto the methods the relay serves
//! - Capture the raw request target (path plus query) for routing
//! - Read the body only when a positive `Content-Length` was declared
//!
//! # Design Decisions
//! - A body without a declared length is ignored, never streamed
//! - Bodies are bounded by `limits.max_body_size`

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, Method, Request};

use crate::http::error::RelayError;

/// Methods that reach the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
}

impl RequestMethod {
    pub fn from_http(method: &Method) -> Option<Self> {
        match *method {
            Method::GET => Some(Self::Get),
            Method::POST => Some(Self::Post),
            _ => None,
        }
    }

    pub fn as_http(self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Post => Method::POST,
        }
    }
}

/// A client request, fully read.
#[derive(Debug, Clone)]
pub struct IncomingRequest {
    pub method: RequestMethod,
    /// Request target as received, e.g. `/proxy/solar-api/v1/x?key=k`.
    pub path: String,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

impl IncomingRequest {
    /// Consume an axum request, reading the body if one was declared.
    pub async fn from_request(
        request: Request<Body>,
        method: RequestMethod,
        max_body_size: usize,
    ) -> Result<Self, RelayError> {
        let (parts, body) = request.into_parts();
        let path = parts
            .uri
            .path_and_query()
            .map_or_else(|| parts.uri.path().to_string(), |pq| pq.as_str().to_string());

        let declared = declared_content_length(&parts.headers)?;
        let body = if declared > 0 {
            if declared > max_body_size as u64 {
                return Err(RelayError::PayloadTooLarge {
                    limit: max_body_size,
                });
            }
            let bytes = axum::body::to_bytes(body, max_body_size)
                .await
                .map_err(|e| RelayError::MalformedRequest(format!("failed to read request body: {e}")))?;
            Some(bytes)
        } else {
            None
        };

        Ok(Self {
            method,
            path,
            headers: parts.headers,
            body,
        })
    }
}

/// Declared body length. Missing or negative means no body.
pub(crate) fn declared_content_length(headers: &HeaderMap) -> Result<u64, RelayError> {
    let Some(value) = headers.get(header::CONTENT_LENGTH) else {
        return Ok(0);
    };
    let parsed = value
        .to_str()
        .ok()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .ok_or_else(|| {
            RelayError::MalformedRequest(format!("invalid Content-Length {value:?}"))
        })?;
    Ok(u64::try_from(parsed).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_length(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn method_mapping() {
        assert_eq!(RequestMethod::from_http(&Method::GET), Some(RequestMethod::Get));
        assert_eq!(RequestMethod::from_http(&Method::POST), Some(RequestMethod::Post));
        assert_eq!(RequestMethod::from_http(&Method::PUT), None);
        assert_eq!(RequestMethod::from_http(&Method::OPTIONS), None);
        assert_eq!(RequestMethod::Post.as_http(), Method::POST);
    }

    #[test]
    fn content_length_parsing() {
        assert_eq!(declared_content_length(&HeaderMap::new()).unwrap(), 0);
        assert_eq!(declared_content_length(&headers_with_length("42")).unwrap(), 42);
        assert_eq!(declared_content_length(&headers_with_length(" 7 ")).unwrap(), 7);
        assert_eq!(declared_content_length(&headers_with_length("-3")).unwrap(), 0);

        let err = declared_content_length(&headers_with_length("twelve")).unwrap_err();
        assert!(matches!(err, RelayError::MalformedRequest(_)));
        assert!(err.to_string().starts_with("Proxy error: invalid Content-Length"));
    }

    #[tokio::test]
    async fn reads_declared_body_and_raw_target() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/proxy/solar-api/v1/x?key=k")
            .header(header::CONTENT_LENGTH, "5")
            .body(Body::from("hello"))
            .unwrap();

        let incoming = IncomingRequest::from_request(request, RequestMethod::Post, 1024)
            .await
            .unwrap();
        assert_eq!(incoming.path, "/proxy/solar-api/v1/x?key=k");
        assert_eq!(incoming.body.as_deref(), Some(&b"hello"[..]));
    }

    #[tokio::test]
    async fn ignores_body_without_length() {
        let request = Request::builder()
            .uri("/index.html")
            .body(Body::from("stray"))
            .unwrap();

        let incoming = IncomingRequest::from_request(request, RequestMethod::Get, 1024)
            .await
            .unwrap();
        assert!(incoming.body.is_none());
    }

    #[tokio::test]
    async fn rejects_oversized_body() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/x")
            .header(header::CONTENT_LENGTH, "2048")
            .body(Body::from(vec![0u8; 2048]))
            .unwrap();

        let err = IncomingRequest::from_request(request, RequestMethod::Post, 1024)
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::PayloadTooLarge { limit: 1024 }));
    }
}
