//! Local CORS relay library.
//!
//! Proxies configured path prefixes to fixed upstream hosts, adding CORS
//! headers, and serves static files for everything else.

pub mod cli;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
