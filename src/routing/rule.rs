//! Compiled proxy rules.
//!
//! # Design Decisions
//! - Path matching is case-sensitive and byte-wise
//! - The strip length is applied to the raw request target, so the query
//!   string travels upstream untouched

use crate::config::RouteConfig;

/// A proxy rule ready for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRule {
    name: String,
    prefix: String,
    upstream: String,
    strip_len: usize,
}

impl ProxyRule {
    /// Create a rule. `strip_len` must not exceed `prefix.len()` and must
    /// land on a character boundary of `prefix` (see config validation).
    pub fn new(
        name: impl Into<String>,
        prefix: impl Into<String>,
        upstream: impl Into<String>,
        strip_len: usize,
    ) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
            upstream: upstream.into(),
            strip_len,
        }
    }

    pub fn from_config(config: &RouteConfig) -> Self {
        Self::new(
            config.display_name(),
            config.prefix.clone(),
            config.upstream.clone(),
            config.strip_len(),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn upstream(&self) -> &str {
        &self.upstream
    }

    pub fn strip_len(&self) -> usize {
        self.strip_len
    }

    /// Returns true if the request target starts with this rule's prefix.
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }

    /// Remove the configured number of leading bytes from a matching path.
    ///
    /// Returns `None` when the path does not match.
    pub fn rewrite<'a>(&self, path: &'a str) -> Option<&'a str> {
        if !self.matches(path) {
            return None;
        }
        // A matching path starts with the prefix, and the strip length is a
        // char boundary of the prefix, so this never panics.
        path.get(self.strip_len..)
    }
}
