//! Header filtering and CORS headers.
//!
//! # Responsibilities
//! - Decide which headers cross each leg of the relay
//! - Produce the fixed CORS header set for a header mode
//!
//! # Design Decisions
//! - Names compared case-insensitively (`HeaderName` is already lowercase)
//! - CORS headers are set after filtering and replace any surviving value

use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};

use crate::config::HeaderMode;

/// Which leg of the relay a header travels on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Client → upstream.
    Inbound,
    /// Upstream → client.
    FromUpstream,
}

const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
const ALLOW_HEADERS_PERMISSIVE: &str = "Content-Type";
const ALLOW_HEADERS_STRICT: &str = "Content-Type, Authorization";

/// Header policy for one header mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderPolicy {
    mode: HeaderMode,
}

impl HeaderPolicy {
    pub fn new(mode: HeaderMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> HeaderMode {
        self.mode
    }

    /// Returns true if a header named `name` may cross in `direction`.
    pub fn allows(&self, direction: Direction, name: &str) -> bool {
        let strict = self.mode == HeaderMode::Strict;
        let dropped = match direction {
            Direction::Inbound => {
                name.eq_ignore_ascii_case("host")
                    || (strict
                        && (name.eq_ignore_ascii_case("origin")
                            || name.eq_ignore_ascii_case("referer")))
            }
            Direction::FromUpstream => {
                name.eq_ignore_ascii_case("content-encoding")
                    || name.eq_ignore_ascii_case("transfer-encoding")
                    || (strict && name.eq_ignore_ascii_case("content-security-policy"))
            }
        };
        !dropped
    }

    /// Copy every allowed header, keeping repeated values.
    pub fn filter(&self, direction: Direction, headers: &HeaderMap) -> HeaderMap {
        let mut out = HeaderMap::with_capacity(headers.len());
        for (name, value) in headers {
            if self.allows(direction, name.as_str()) {
                out.append(name.clone(), value.clone());
            }
        }
        out
    }

    /// The three CORS headers, in order.
    pub fn cors_headers(&self) -> [(HeaderName, HeaderValue); 3] {
        let allow_headers = match self.mode {
            HeaderMode::Permissive => ALLOW_HEADERS_PERMISSIVE,
            HeaderMode::Strict => ALLOW_HEADERS_STRICT,
        };
        [
            (
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static("*"),
            ),
            (
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static(ALLOW_METHODS),
            ),
            (
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static(allow_headers),
            ),
        ]
    }

    /// Set the CORS headers, replacing all existing values of those names.
    pub fn apply_cors(&self, headers: &mut HeaderMap) {
        for (name, value) in self.cors_headers() {
            headers.insert(name, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODES: [HeaderMode; 2] = [HeaderMode::Permissive, HeaderMode::Strict];

    #[test]
    fn host_never_forwarded() {
        for mode in MODES {
            let policy = HeaderPolicy::new(mode);
            assert!(!policy.allows(Direction::Inbound, "Host"));
            assert!(!policy.allows(Direction::Inbound, "host"));
            assert!(policy.allows(Direction::Inbound, "Content-Type"));
            assert!(policy.allows(Direction::Inbound, "Authorization"));
        }
    }

    #[test]
    fn transfer_framing_never_returned() {
        for mode in MODES {
            let policy = HeaderPolicy::new(mode);
            assert!(!policy.allows(Direction::FromUpstream, "Content-Encoding"));
            assert!(!policy.allows(Direction::FromUpstream, "TRANSFER-ENCODING"));
            assert!(policy.allows(Direction::FromUpstream, "Content-Type"));
        }
    }

    #[test]
    fn strict_mode_drops_origin_referer_and_csp() {
        let strict = HeaderPolicy::new(HeaderMode::Strict);
        let permissive = HeaderPolicy::new(HeaderMode::Permissive);

        for name in ["Origin", "Referer"] {
            assert!(!strict.allows(Direction::Inbound, name));
            assert!(permissive.allows(Direction::Inbound, name));
        }
        assert!(!strict.allows(Direction::FromUpstream, "Content-Security-Policy"));
        assert!(permissive.allows(Direction::FromUpstream, "content-security-policy"));

        // Direction matters: Origin is only an inbound concern.
        assert!(strict.allows(Direction::FromUpstream, "Origin"));
    }

    #[test]
    fn filter_keeps_repeated_values() {
        let mut headers = HeaderMap::new();
        headers.append(header::SET_COOKIE, HeaderValue::from_static("a=1"));
        headers.append(header::SET_COOKIE, HeaderValue::from_static("b=2"));
        headers.insert(header::CONTENT_ENCODING, HeaderValue::from_static("gzip"));

        let filtered = HeaderPolicy::new(HeaderMode::Strict).filter(Direction::FromUpstream, &headers);
        assert_eq!(filtered.get_all(header::SET_COOKIE).iter().count(), 2);
        assert!(!filtered.contains_key(header::CONTENT_ENCODING));
    }

    #[test]
    fn cors_headers_depend_on_mode() {
        let strict = HeaderPolicy::new(HeaderMode::Strict).cors_headers();
        let permissive = HeaderPolicy::new(HeaderMode::Permissive).cors_headers();

        assert_eq!(strict[0].1, "*");
        assert_eq!(strict[1].1, "GET, POST, OPTIONS");
        assert_eq!(strict[2].1, "Content-Type, Authorization");
        assert_eq!(permissive[2].1, "Content-Type");
    }

    #[test]
    fn apply_cors_overwrites_upstream_values() {
        let mut headers = HeaderMap::new();
        headers.append(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("https://maps.example"),
        );
        headers.append(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("https://other.example"),
        );

        HeaderPolicy::new(HeaderMode::Permissive).apply_cors(&mut headers);

        let origins: Vec<_> = headers
            .get_all(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .iter()
            .collect();
        assert_eq!(origins, vec![HeaderValue::from_static("*")]);
        assert_eq!(headers.len(), 3);
    }
}
