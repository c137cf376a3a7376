//! Named deployment profiles.
//!
//! The relay historically ran in two shapes: mounted under `/proxy/` next to
//! the app on port 8080 with strict header filtering, and as a standalone
//! proxy on port 3001 with short prefixes and permissive filtering. Both are
//! plain `RelayConfig` values here.

use crate::config::schema::{
    HeaderMode, HeadersConfig, LimitsConfig, ListenerConfig, ObservabilityConfig, RelayConfig,
    RouteConfig, StaticFilesConfig, UpstreamConfig,
};

pub const MARIN_GIS_UPSTREAM: &str = "https://gisopendata.marincounty.gov";
pub const SOLAR_API_UPSTREAM: &str = "https://solar.googleapis.com";

/// Built-in configuration profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Profile {
    /// `/proxy/marin-gis/`, `/proxy/solar-api/` on port 8080, strict headers.
    #[default]
    Proxy,
    /// `/marin-gis/`, `/solar-api/` on port 3001, permissive headers.
    Standalone,
}

impl Profile {
    /// Build the full configuration for this profile.
    pub fn config(self) -> RelayConfig {
        match self {
            Profile::Proxy => RelayConfig {
                listener: ListenerConfig {
                    bind_address: "127.0.0.1:8080".to_string(),
                },
                static_files: StaticFilesConfig::default(),
                headers: HeadersConfig {
                    mode: HeaderMode::Strict,
                },
                routes: vec![
                    RouteConfig::new("marin-gis", "/proxy/marin-gis/", MARIN_GIS_UPSTREAM, 16),
                    RouteConfig::new("solar-api", "/proxy/solar-api/", SOLAR_API_UPSTREAM, 16),
                ],
                upstream: UpstreamConfig::default(),
                limits: LimitsConfig::default(),
                observability: ObservabilityConfig::default(),
            },
            Profile::Standalone => RelayConfig {
                listener: ListenerConfig {
                    bind_address: "127.0.0.1:3001".to_string(),
                },
                static_files: StaticFilesConfig::default(),
                headers: HeadersConfig {
                    mode: HeaderMode::Permissive,
                },
                routes: vec![
                    RouteConfig::new("marin-gis", "/marin-gis/", MARIN_GIS_UPSTREAM, 10),
                    RouteConfig::new("solar-api", "/solar-api/", SOLAR_API_UPSTREAM, 10),
                ],
                upstream: UpstreamConfig::default(),
                limits: LimitsConfig::default(),
                observability: ObservabilityConfig::default(),
            },
        }
    }
}
