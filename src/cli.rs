//! Command-line interface.
//!
//! Precedence, lowest first: profile defaults, config file, flags (or their
//! `CORS_RELAY_*` environment variables).

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::config::{
    load_config_over, validate_config, ConfigError, HeaderMode, Profile, RelayConfig,
};

#[derive(Debug, Parser)]
#[command(name = "cors-relay")]
#[command(about = "Local CORS relay for browser map apps", long_about = None)]
pub struct Cli {
    /// TOML configuration file, layered over the profile.
    #[arg(short, long, env = "CORS_RELAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Built-in profile supplying the defaults.
    #[arg(long, value_enum, default_value_t = Profile::Proxy, env = "CORS_RELAY_PROFILE")]
    pub profile: Profile,

    /// Listener address, e.g. 127.0.0.1:8080.
    #[arg(short, long, env = "CORS_RELAY_BIND")]
    pub bind: Option<String>,

    /// Listener port; keeps the host of the bind address.
    #[arg(short, long, env = "CORS_RELAY_PORT")]
    pub port: Option<u16>,

    /// Static file root.
    #[arg(short, long, env = "CORS_RELAY_ROOT")]
    pub root: Option<PathBuf>,

    /// Header filtering: permissive or strict.
    #[arg(long, env = "CORS_RELAY_HEADER_MODE")]
    pub header_mode: Option<HeaderMode>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, env = "CORS_RELAY_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines.
    #[arg(long, env = "CORS_RELAY_LOG_JSON")]
    pub log_json: bool,
}

impl Cli {
    /// Build the effective, validated configuration.
    pub fn resolve_config(&self) -> Result<RelayConfig, ConfigError> {
        let base = self.profile.config();
        let mut config = match &self.config {
            Some(path) => load_config_over(path, &base)?,
            None => base,
        };

        self.apply_overrides(&mut config);
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut RelayConfig) {
        if let Some(bind) = &self.bind {
            config.listener.bind_address = bind.clone();
        }
        if let Some(port) = self.port {
            // An unparsable address is left for validation to report.
            if let Ok(mut addr) = config.listener.bind_address.parse::<SocketAddr>() {
                addr.set_port(port);
                config.listener.bind_address = addr.to_string();
            }
        }
        if let Some(root) = &self.root {
            config.static_files.root = root.display().to_string();
        }
        if let Some(mode) = self.header_mode {
            config.headers.mode = mode;
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
        if self.log_json {
            config.observability.json = true;
        }
    }
}
