//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every proxy rule can be applied to a matching path
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("static_files.root must not be empty")]
    EmptyRoot,

    #[error("static_files.default_document '{0}' must start with '/'")]
    DefaultDocument(String),

    #[error("route '{route}': prefix must start with '/'")]
    PrefixNotRooted { route: String },

    #[error("route '{route}': strip length {strip} exceeds prefix length {prefix_len}")]
    StripTooLong {
        route: String,
        strip: usize,
        prefix_len: usize,
    },

    #[error("route '{route}': strip length {strip} splits a character")]
    StripNotOnBoundary { route: String, strip: usize },

    #[error("route '{route}': upstream '{upstream}' is not an absolute http(s) URL")]
    Upstream { route: String, upstream: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Check a configuration for semantic errors.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.static_files.root.is_empty() {
        errors.push(ValidationError::EmptyRoot);
    }
    if !config.static_files.default_document.starts_with('/') {
        errors.push(ValidationError::DefaultDocument(
            config.static_files.default_document.clone(),
        ));
    }

    for route in &config.routes {
        let name = route.display_name().to_string();
        if !route.prefix.starts_with('/') {
            errors.push(ValidationError::PrefixNotRooted { route: name.clone() });
        }

        let strip = route.strip_len();
        if strip > route.prefix.len() {
            errors.push(ValidationError::StripTooLong {
                route: name.clone(),
                strip,
                prefix_len: route.prefix.len(),
            });
        } else if !route.prefix.is_char_boundary(strip) {
            errors.push(ValidationError::StripNotOnBoundary {
                route: name.clone(),
                strip,
            });
        }

        let upstream_ok = Url::parse(&route.upstream)
            .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
            .unwrap_or(false);
        if !upstream_ok {
            errors.push(ValidationError::Upstream {
                route: name,
                upstream: route.upstream.clone(),
            });
        }
    }

    if config.upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::Zero("upstream.connect_timeout_secs"));
    }
    if config.upstream.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero("upstream.request_timeout_secs"));
    }
    if config.limits.max_body_size == 0 {
        errors.push(ValidationError::Zero("limits.max_body_size"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
