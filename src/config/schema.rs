//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.
//! Every section falls back to the `proxy` profile defaults.

use serde::{Deserialize, Serialize};

use crate::config::profile::Profile;

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Static asset serving.
    pub static_files: StaticFilesConfig,

    /// Header filtering strictness.
    pub headers: HeadersConfig,

    /// Proxy rules, checked in order. First match wins.
    pub routes: Vec<RouteConfig>,

    /// Outbound client settings.
    pub upstream: UpstreamConfig,

    /// Request limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Profile::Proxy.config()
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// How the static server labels file bodies.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContentTypeMode {
    /// Always `text/html`.
    #[default]
    Fixed,
    /// Derived from the file extension, `application/octet-stream` otherwise.
    Extension,
}

/// Static asset configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Directory that unmatched paths are served from.
    pub root: String,

    /// Document served for `/`. Must start with `/`.
    pub default_document: String,

    /// Content type selection.
    pub content_type: ContentTypeMode,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: ".".to_string(),
            default_document: "/property-mapper.html".to_string(),
            content_type: ContentTypeMode::Fixed,
        }
    }
}

/// Header filter strictness.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum HeaderMode {
    /// Drops only `Host` inbound and transfer framing outbound.
    Permissive,
    /// Also drops `Origin`, `Referer` and `Content-Security-Policy`,
    /// and advertises `Authorization` as an allowed header.
    #[default]
    Strict,
}

impl std::str::FromStr for HeaderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "permissive" => Ok(Self::Permissive),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown header mode '{other}' (expected 'permissive' or 'strict')")),
        }
    }
}

/// Header configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct HeadersConfig {
    pub mode: HeaderMode,
}

/// A proxy rule mapping a path prefix to an upstream host.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RouteConfig {
    /// Route identifier for logging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Path prefix to match (e.g., "/proxy/marin-gis/").
    pub prefix: String,

    /// Upstream scheme and host (e.g., "https://solar.googleapis.com").
    pub upstream: String,

    /// Number of leading bytes removed from the path before it is appended
    /// to `upstream`. Defaults to the prefix length minus its trailing slash,
    /// so the remainder keeps its leading `/`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strip: Option<usize>,
}

impl RouteConfig {
    pub fn new(name: &str, prefix: &str, upstream: &str, strip: usize) -> Self {
        Self {
            name: Some(name.to_string()),
            prefix: prefix.to_string(),
            upstream: upstream.to_string(),
            strip: Some(strip),
        }
    }

    /// Effective strip length.
    pub fn strip_len(&self) -> usize {
        self.strip.unwrap_or_else(|| {
            if self.prefix.ends_with('/') {
                self.prefix.len() - 1
            } else {
                self.prefix.len()
            }
        })
    }

    /// Name used in logs.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.prefix)
    }
}

/// Outbound client configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Total time allowed for one upstream exchange in seconds.
    pub request_timeout_secs: u64,

    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub use_env_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            request_timeout_secs: 60,
            use_env_proxy: true,
        }
    }
}

/// Request limits.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct LimitsConfig {
    /// Largest request body read from a client, in bytes.
    pub max_body_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins if set.
    pub log_level: String,

    /// Emit logs as JSON lines.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_defaults_to_prefix_without_trailing_slash() {
        let route = RouteConfig {
            name: None,
            prefix: "/proxy/marin-gis/".into(),
            upstream: "https://gisopendata.marincounty.gov".into(),
            strip: None,
        };
        assert_eq!(route.strip_len(), 16);
        assert_eq!(route.display_name(), "/proxy/marin-gis/");

        let bare = RouteConfig { prefix: "/api".into(), ..route };
        assert_eq!(bare.strip_len(), 4);
    }

    #[test]
    fn header_mode_parses_case_insensitively() {
        assert_eq!("Strict".parse::<HeaderMode>(), Ok(HeaderMode::Strict));
        assert_eq!("permissive".parse::<HeaderMode>(), Ok(HeaderMode::Permissive));
        assert!("lenient".parse::<HeaderMode>().is_err());
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config: RelayConfig = toml::from_str("").unwrap();
        assert_eq!(config, RelayConfig::default());
    }
}
