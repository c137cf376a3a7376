//! Route lookup.
//!
//! # Responsibilities
//! - Store compiled proxy rules in configured order
//! - Map a request target to exactly one `RouteDecision`
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) prefix scan, first match wins (not longest match)
//! - Total: anything unmatched falls back to a static asset

use crate::config::RelayConfig;
use crate::routing::rule::ProxyRule;

/// Where a request goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Forward to `host + rewritten_path`.
    Upstream {
        host: String,
        rewritten_path: String,
    },
    /// Serve a file, path relative to the static root.
    StaticAsset { local_path: String },
}

/// Resolve a request target against an ordered rule list.
///
/// `path` is the raw request target (path plus optional query). Matching
/// rules forward it verbatim after the prefix strip. Everything else maps to a
/// static asset: the query is dropped, `/` becomes `default_document`, and the
/// leading slash is removed.
pub fn resolve(path: &str, rules: &[ProxyRule], default_document: &str) -> RouteDecision {
    if let Some((rule, rest)) = rules
        .iter()
        .find_map(|rule| rule.rewrite(path).map(|rest| (rule, rest)))
    {
        return RouteDecision::Upstream {
            host: rule.upstream().to_string(),
            rewritten_path: rest.to_string(),
        };
    }

    let file_path = path.split_once('?').map_or(path, |(p, _)| p);
    let file_path = if file_path == "/" {
        default_document
    } else {
        file_path
    };

    RouteDecision::StaticAsset {
        local_path: file_path.strip_prefix('/').unwrap_or(file_path).to_string(),
    }
}

/// Compiled routing table.
#[derive(Debug, Clone)]
pub struct Router {
    rules: Vec<ProxyRule>,
    default_document: String,
}

impl Router {
    pub fn new(rules: Vec<ProxyRule>, default_document: impl Into<String>) -> Self {
        Self {
            rules,
            default_document: default_document.into(),
        }
    }

    /// Compile the routing table from configuration, keeping rule order.
    pub fn from_config(config: &RelayConfig) -> Self {
        Self::new(
            config.routes.iter().map(ProxyRule::from_config).collect(),
            config.static_files.default_document.clone(),
        )
    }

    pub fn rules(&self) -> &[ProxyRule] {
        &self.rules
    }

    /// Resolve a request target. See [`resolve`].
    pub fn resolve(&self, path: &str) -> RouteDecision {
        resolve(path, &self.rules, &self.default_document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Profile;

    fn proxy_router() -> Router {
        Router::from_config(&Profile::Proxy.config())
    }

    #[test]
    fn marin_gis_scenario() {
        let decision = proxy_router().resolve("/proxy/marin-gis/arcgis/rest/services");
        assert_eq!(
            decision,
            RouteDecision::Upstream {
                host: "https://gisopendata.marincounty.gov".into(),
                rewritten_path: "/arcgis/rest/services".into(),
            }
        );
    }

    #[test]
    fn strip_removes_exactly_configured_length() {
        let router = proxy_router();
        for rest in ["/", "/a", "/v1/buildingInsights:findClosest?location.latitude=37.9", "//x"] {
            let path = format!("/proxy/solar-api{rest}");
            let decision = router.resolve(&path);
            assert_eq!(
                decision,
                RouteDecision::Upstream {
                    host: "https://solar.googleapis.com".into(),
                    rewritten_path: path[16..].to_string(),
                }
            );
        }
    }

    #[test]
    fn standalone_profile_mounts() {
        let router = Router::from_config(&Profile::Standalone.config());
        assert_eq!(
            router.resolve("/solar-api/v1/dataLayers:get?key=abc"),
            RouteDecision::Upstream {
                host: "https://solar.googleapis.com".into(),
                rewritten_path: "/v1/dataLayers:get?key=abc".into(),
            }
        );
        // The long mount is not a proxy route in this profile.
        assert_eq!(
            router.resolve("/proxy/marin-gis/x"),
            RouteDecision::StaticAsset {
                local_path: "proxy/marin-gis/x".into()
            }
        );
    }

    #[test]
    fn first_match_wins_for_overlapping_prefixes() {
        let rules = vec![
            ProxyRule::new("broad", "/api/", "https://broad.example", 4),
            ProxyRule::new("narrow", "/api/v2/", "https://narrow.example", 7),
        ];
        let decision = resolve("/api/v2/items", &rules, "/index.html");
        assert_eq!(
            decision,
            RouteDecision::Upstream {
                host: "https://broad.example".into(),
                rewritten_path: "/v2/items".into(),
            }
        );

        let reversed: Vec<_> = rules.into_iter().rev().collect();
        let decision = resolve("/api/v2/items", &reversed, "/index.html");
        assert_eq!(
            decision,
            RouteDecision::Upstream {
                host: "https://narrow.example".into(),
                rewritten_path: "/items".into(),
            }
        );
    }

    #[test]
    fn unmatched_paths_fall_back_to_static() {
        let router = proxy_router();
        assert_eq!(
            router.resolve("/"),
            RouteDecision::StaticAsset {
                local_path: "property-mapper.html".into()
            }
        );
        assert_eq!(
            router.resolve("/js/app.js"),
            RouteDecision::StaticAsset {
                local_path: "js/app.js".into()
            }
        );
        assert_eq!(
            router.resolve("/?cache=1"),
            RouteDecision::StaticAsset {
                local_path: "property-mapper.html".into()
            }
        );
        assert_eq!(
            router.resolve("/style.css?v=2"),
            RouteDecision::StaticAsset {
                local_path: "style.css".into()
            }
        );
        assert!(matches!(
            router.resolve("/missing.html"),
            RouteDecision::StaticAsset { .. }
        ));
    }

    #[test]
    fn empty_rule_list_is_total() {
        let router = Router::new(Vec::new(), "/home.html");
        assert!(router.rules().is_empty());
        assert_eq!(
            router.resolve("/"),
            RouteDecision::StaticAsset {
                local_path: "home.html".into()
            }
        );
    }
}
